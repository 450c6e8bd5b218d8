//! Stub language compiler
//!
//! Turns generated source into a [`CompiledArtifact`]:
//!
//! 1. draw a fresh [`ArtifactName`]
//! 2. lex and parse
//! 3. check against the three [`References`] units
//! 4. lower the checked classes
//!
//! Lexer, parser and checker problems all end up as [`Diagnostic`]s in one
//! [`CompileError`]. Nothing is retried.

pub mod artifact;
pub mod checker;
pub mod error;
pub mod ir;
pub mod lower;
pub mod references;
pub mod types;

pub use artifact::{ArtifactName, CompiledArtifact};
pub use error::{CompileError, CompileResult};
pub use references::{ReferenceUnit, References};

use crate::diagnostic::Diagnostic;
use crate::parser::Parser;
use crate::vm::WrapperClass;

/// A compiler backend.
///
/// Implementations must produce a fresh artifact name on every call.
pub trait Backend: Send + Sync {
    fn build(&self, source: &str, refs: &References) -> CompileResult<CompiledArtifact>;
}

/// The in-process stub language compiler.
#[derive(Debug, Clone, Copy, Default)]
pub struct Compiler;

impl Compiler {
    pub fn new() -> Self {
        Self
    }
}

impl Backend for Compiler {
    fn build(&self, source: &str, refs: &References) -> CompileResult<CompiledArtifact> {
        let name = ArtifactName::generate();
        let fail = |diagnostics: Vec<Diagnostic>| CompileError::new(name.clone(), diagnostics, source);

        log::debug!("[{}] parsing {} bytes", name, source.len());
        let parser = Parser::new(source)
            .map_err(|errors| fail(errors.iter().map(Diagnostic::from_lex_error).collect()))?;
        let unit = parser
            .parse()
            .map_err(|errors| fail(errors.iter().map(Diagnostic::from_parse_error).collect()))?;

        log::debug!(
            "[{}] checking {} class(es) against {}",
            name,
            unit.classes.len(),
            refs.units()
                .iter()
                .map(|u| u.name())
                .collect::<Vec<_>>()
                .join(", ")
        );
        let diagnostics = checker::check(&unit, refs);
        if diagnostics.iter().any(Diagnostic::is_error) {
            log::debug!("[{}] {} diagnostic(s)", name, diagnostics.len());
            return Err(fail(diagnostics));
        }

        log::debug!("[{}] lowering", name);
        let namespace = unit.namespace.as_ref().map(|ns| ns.name.clone());
        let classes = lower::lower(&unit)
            .map_err(|diagnostic| fail(vec![diagnostic]))?
            .into_iter()
            .map(|def| WrapperClass::new(def, refs.target_type(), namespace.as_deref()))
            .collect::<Vec<_>>();

        log::info!(
            "built artifact {} ({} class{})",
            name,
            classes.len(),
            if classes.len() == 1 { "" } else { "es" }
        );
        Ok(CompiledArtifact::new(name, namespace, classes, source))
    }
}
