//! `stubgen check` - compile a hand-written stub against a type.

use std::path::{Path, PathBuf};

use anyhow::Context;
use stubgen_engine::{Backend, Compiler, References};

use crate::output::StyledOutput;

pub fn run(
    source: &Path,
    target: &Path,
    related: &[PathBuf],
    out: &mut StyledOutput,
) -> anyhow::Result<bool> {
    let text = std::fs::read_to_string(source)
        .with_context(|| format!("reading {}", source.display()))?;
    let refs = super::load_related(related)?
        .into_iter()
        .fold(
            References::for_target(&super::load_descriptor(target)?),
            References::with_related,
        );

    match Compiler::new().build(&text, &refs) {
        Ok(artifact) => {
            let classes: Vec<String> =
                artifact.classes().iter().map(|c| c.qualified_name()).collect();
            out.heading("Checked", &source.display().to_string())?;
            out.item("classes", &classes.join(", "))?;
            Ok(true)
        }
        Err(err) => {
            out.diagnostics(&err, &source.display().to_string())?;
            Ok(false)
        }
    }
}
