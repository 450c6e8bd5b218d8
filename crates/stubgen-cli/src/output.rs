//! Colored terminal output.
//!
//! Respects the `NO_COLOR` environment variable and the `--color` flag.

use std::io::{self, Write};

use stubgen_engine::CompileError;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::app::ColorWhen;

/// Resolve `ColorChoice` from the CLI flag and environment.
///
/// Priority: `NO_COLOR` env > `--color` flag > auto-detect TTY.
pub fn resolve_color_choice(flag: ColorWhen) -> ColorChoice {
    if std::env::var_os("NO_COLOR").is_some() {
        return ColorChoice::Never;
    }
    match flag {
        ColorWhen::Always => ColorChoice::Always,
        ColorWhen::Never => ColorChoice::Never,
        ColorWhen::Auto => ColorChoice::Auto,
    }
}

/// Styled writer over stdout and stderr.
pub struct StyledOutput {
    choice: ColorChoice,
    stdout: StandardStream,
}

impl StyledOutput {
    pub fn new(choice: ColorChoice) -> Self {
        Self {
            choice,
            stdout: StandardStream::stdout(choice),
        }
    }

    fn styled(&mut self, text: &str, color: Color, bold: bool) -> io::Result<()> {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(color)).set_bold(bold);
        self.stdout.set_color(&spec)?;
        write!(self.stdout, "{}", text)?;
        self.stdout.reset()
    }

    /// Bold heading line.
    pub fn heading(&mut self, label: &str, text: &str) -> io::Result<()> {
        self.styled(label, Color::Green, true)?;
        writeln!(self.stdout, " {}", text)
    }

    /// Indented detail line with a dimmed marker.
    pub fn item(&mut self, marker: &str, text: &str) -> io::Result<()> {
        write!(self.stdout, "  ")?;
        self.styled(marker, Color::Cyan, false)?;
        writeln!(self.stdout, " {}", text)
    }

    /// Plain line.
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.stdout, "{}", text)
    }

    /// Render compile diagnostics on stderr.
    pub fn diagnostics(&mut self, err: &CompileError, file_name: &str) -> anyhow::Result<()> {
        let mut stderr = StandardStream::stderr(self.choice);
        err.emit(&mut stderr, file_name)?;
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Red)).set_bold(true);
        stderr.set_color(&spec)?;
        write!(stderr, "error")?;
        stderr.reset()?;
        writeln!(
            stderr,
            ": could not compile artifact {} ({} error{})",
            err.artifact(),
            err.diagnostics().len(),
            if err.diagnostics().len() == 1 { "" } else { "s" }
        )?;
        Ok(())
    }
}
