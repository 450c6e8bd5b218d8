//! `stubgen build` - generate, compile and describe the artifact.

use std::path::{Path, PathBuf};

use stubgen_engine::parser::ast::Visibility;
use stubgen_engine::{Error, StubGenerator, WrapperClass};

use crate::app::GlobalOptions;
use crate::output::StyledOutput;

/// File name diagnostics of generated source are reported against.
const GENERATED_FILE: &str = "<generated>";

pub fn run(
    descriptor: &Path,
    related: &[PathBuf],
    global: &GlobalOptions,
    out: &mut StyledOutput,
) -> anyhow::Result<bool> {
    let generator = super::load_related(related)?.into_iter().fold(
        StubGenerator::new(super::load_descriptor(descriptor)?)
            .with_options(super::load_options(global)?),
        StubGenerator::with_related,
    );

    let artifact = match generator.compile() {
        Ok(artifact) => artifact,
        Err(Error::Compile(err)) => {
            out.diagnostics(&err, GENERATED_FILE)?;
            return Ok(false);
        }
        Err(other) => return Err(other.into()),
    };

    out.heading("Built", &format!("artifact {}", artifact.name()))?;
    for class in artifact.classes() {
        describe(class, out)?;
    }
    Ok(true)
}

fn describe(class: &WrapperClass, out: &mut StyledOutput) -> anyhow::Result<()> {
    let def = class.definition();
    out.item(
        "class",
        &format!("{} wraps {}", class.qualified_name(), class.source_type()),
    )?;

    for property in &def.properties {
        let mut accessors = Vec::new();
        if property.getter.as_ref().map_or(false, |g| g.is_public()) {
            accessors.push("get;");
        }
        if property.setter.as_ref().map_or(false, |s| s.is_public()) {
            accessors.push("set;");
        }
        if accessors.is_empty() {
            continue;
        }
        out.item(
            "property",
            &format!("{}: {} {{ {} }}", property.name, property.type_name, accessors.join(" ")),
        )?;
    }

    for method in def.methods.iter().filter(|m| m.visibility == Visibility::Public) {
        let params: Vec<String> = method
            .params
            .iter()
            .map(|p| {
                let mode = if p.out { "out " } else { "" };
                format!("{}{}: {}", mode, p.name, p.type_name)
            })
            .collect();
        out.item(
            "method",
            &format!("{}({}): {}", method.name, params.join(", "), method.return_type),
        )?;
    }
    Ok(())
}
