//! Subcommand implementations and the loading they share.

pub mod build;
pub mod check;
pub mod emit;

use std::path::{Path, PathBuf};

use anyhow::Context;
use stubgen_engine::{GeneratorOptions, TypeDescriptor, CONFIG_FILE_NAME};

use crate::app::GlobalOptions;

/// Generator options from `--config`, `./stubgen.toml`, or the defaults.
pub fn load_options(global: &GlobalOptions) -> anyhow::Result<GeneratorOptions> {
    let path = match &global.config {
        Some(path) => path.clone(),
        None => {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if !local.is_file() {
                log::debug!("no {} found, using default options", CONFIG_FILE_NAME);
                return Ok(GeneratorOptions::default());
            }
            local
        }
    };
    GeneratorOptions::load(&path).with_context(|| format!("loading {}", path.display()))
}

/// Read a JSON type descriptor.
pub fn load_descriptor(path: &Path) -> anyhow::Result<TypeDescriptor> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading descriptor {}", path.display()))?;
    let descriptor = TypeDescriptor::from_json(&text)
        .with_context(|| format!("parsing descriptor {}", path.display()))?;
    log::debug!(
        "loaded descriptor '{}' ({} properties, {} methods)",
        descriptor.name,
        descriptor.properties.len(),
        descriptor.methods.len()
    );
    Ok(descriptor)
}

/// Read every related descriptor.
pub fn load_related(paths: &[PathBuf]) -> anyhow::Result<Vec<TypeDescriptor>> {
    paths.iter().map(|path| load_descriptor(path)).collect()
}
