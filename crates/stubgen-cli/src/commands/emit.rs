//! `stubgen emit` - print the generated wrapper source.

use std::path::{Path, PathBuf};

use anyhow::Context;
use stubgen_engine::StubGenerator;

use crate::app::GlobalOptions;
use crate::output::StyledOutput;

pub fn run(
    descriptor: &Path,
    output: Option<&PathBuf>,
    global: &GlobalOptions,
    out: &mut StyledOutput,
) -> anyhow::Result<bool> {
    let generator = StubGenerator::new(super::load_descriptor(descriptor)?)
        .with_options(super::load_options(global)?);
    let source = generator.generate()?;

    match output {
        Some(path) => {
            std::fs::write(path, source.text())
                .with_context(|| format!("writing {}", path.display()))?;
            out.heading("Wrote", &format!("{} to {}", source.wrapper_name(), path.display()))?;
        }
        None => out.line(source.text())?,
    }
    Ok(true)
}
