//! Compilation errors

use std::fmt;

use codespan_reporting::term::termcolor::WriteColor;

use crate::compiler::artifact::ArtifactName;
use crate::diagnostic::{self, Diagnostic};

pub type CompileResult<T> = Result<T, CompileError>;

/// Failed compilation: the artifact name and every diagnostic produced.
///
/// `Display` renders the full report, one `line:column: error[CODE]: message`
/// line per diagnostic, preceded by a header naming the artifact.
#[derive(Debug, Clone)]
pub struct CompileError {
    artifact: ArtifactName,
    diagnostics: Vec<Diagnostic>,
    source: String,
}

impl CompileError {
    pub fn new(artifact: ArtifactName, diagnostics: Vec<Diagnostic>, source: impl Into<String>) -> Self {
        Self {
            artifact,
            diagnostics,
            source: source.into(),
        }
    }

    /// Name of the artifact that failed to build.
    pub fn artifact(&self) -> &ArtifactName {
        &self.artifact
    }

    /// All diagnostics, in source order of discovery.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The source text that was compiled.
    pub fn source_text(&self) -> &str {
        &self.source
    }

    /// Render every diagnostic as an annotated snippet.
    pub fn emit(
        &self,
        writer: &mut dyn WriteColor,
        file_name: &str,
    ) -> Result<(), codespan_reporting::files::Error> {
        diagnostic::emit(writer, file_name, &self.source, &self.diagnostics)
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "compilation of artifact {} failed with {} error{}",
            self.artifact,
            self.diagnostics.len(),
            if self.diagnostics.len() == 1 { "" } else { "s" }
        )?;
        for diag in &self.diagnostics {
            write!(f, "\n{}", diag)?;
        }
        Ok(())
    }
}

impl std::error::Error for CompileError {}
