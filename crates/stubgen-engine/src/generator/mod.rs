//! Wrapper generation
//!
//! [`StubGenerator`] ties the pieces together: validate the descriptor's
//! shape, classify its members, emit the wrapper source and hand it to a
//! [`Backend`]. Text generation is pure; the compiler only enters through
//! [`StubGenerator::compile_with`].

pub mod classify;
pub mod emit;
pub mod shape;
pub mod template;

pub use classify::{classify, ClassifiedMembers};
pub use emit::{GeneratedSource, SourceEmitter};
pub use shape::{validate_shape, ShapeError};
pub use template::{format, TemplateContext, TemplateError};

use crate::compiler::{Backend, CompiledArtifact, Compiler, References};
use crate::config::GeneratorOptions;
use crate::descriptor::TypeDescriptor;
use crate::error::Result;

/// Generates and compiles a wrapper for one type.
#[derive(Debug, Clone)]
pub struct StubGenerator {
    target: TypeDescriptor,
    related: Vec<TypeDescriptor>,
    options: GeneratorOptions,
}

impl StubGenerator {
    /// Create a generator for `target` with default options.
    pub fn new(target: TypeDescriptor) -> Self {
        Self {
            target,
            related: Vec::new(),
            options: GeneratorOptions::default(),
        }
    }

    /// Replace the generator options.
    pub fn with_options(mut self, options: GeneratorOptions) -> Self {
        self.options = options;
        self
    }

    /// Make the members of a type the target mentions known to the checker.
    pub fn with_related(mut self, related: TypeDescriptor) -> Self {
        self.related.push(related);
        self
    }

    /// The wrapped type.
    pub fn target(&self) -> &TypeDescriptor {
        &self.target
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Generate the wrapper source.
    pub fn generate(&self) -> Result<GeneratedSource> {
        validate_shape(&self.target, &self.options)?;
        let source = SourceEmitter::new(&self.options).emit(&self.target)?;
        Ok(source)
    }

    /// The reference units generated source is checked against.
    pub fn references(&self) -> References {
        self.related
            .iter()
            .cloned()
            .fold(References::for_target(&self.target), References::with_related)
    }

    /// Generate and compile with the built-in compiler.
    pub fn compile(&self) -> Result<CompiledArtifact> {
        self.compile_with(&Compiler::new())
    }

    /// Generate and compile with `backend`.
    pub fn compile_with(&self, backend: &dyn Backend) -> Result<CompiledArtifact> {
        let source = self.generate()?;
        let artifact = backend.build(source.text(), &self.references())?;
        Ok(artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::{ArtifactName, CompileError, CompileResult};
    use crate::descriptor::{PropertyDescriptor, TypeRef};
    use crate::error::Error;
    use parking_lot::Mutex;

    /// Records what it was asked to build and always fails.
    #[derive(Default)]
    struct RecordingBackend {
        seen: Mutex<Vec<(String, String)>>,
    }

    impl Backend for RecordingBackend {
        fn build(&self, source: &str, refs: &References) -> CompileResult<CompiledArtifact> {
            self.seen
                .lock()
                .push((source.to_string(), refs.target_type().to_string()));
            Err(CompileError::new(ArtifactName::generate(), vec![], source))
        }
    }

    fn mock() -> TypeDescriptor {
        TypeDescriptor::new("Mock")
            .with_property(PropertyDescriptor::new("Name", TypeRef::String).read_write())
    }

    #[test]
    fn test_generate_is_pure() {
        let generator = StubGenerator::new(mock());
        assert_eq!(generator.generate().unwrap(), generator.generate().unwrap());
    }

    #[test]
    fn test_compile_with_custom_backend() {
        let backend = RecordingBackend::default();
        let generator = StubGenerator::new(mock());
        let err = generator.compile_with(&backend).unwrap_err();
        assert!(matches!(err, Error::Compile(_)));

        let seen = backend.seen.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, generator.generate().unwrap().text());
        assert_eq!(seen[0].1, "Mock");
    }

    #[test]
    fn test_shape_errors_stop_before_emission() {
        let ty = TypeDescriptor::new("Grid").with_property(
            PropertyDescriptor::new("Cell", TypeRef::Int)
                .readable()
                .indexed_by(TypeRef::Int)
                .indexed_by(TypeRef::Int),
        );
        let backend = RecordingBackend::default();
        let err = StubGenerator::new(ty).compile_with(&backend).unwrap_err();
        assert!(matches!(err, Error::Shape(ShapeError::MultiIndex { .. })));
        assert!(backend.seen.lock().is_empty());
    }

    #[test]
    fn test_related_types_reach_the_references() {
        let target = TypeDescriptor::new("Core")
            .with_property(PropertyDescriptor::new("List", TypeRef::named("Records")).readable());
        let records = TypeDescriptor::new("Records")
            .with_property(PropertyDescriptor::new("Count", TypeRef::Int).readable());
        let refs = StubGenerator::new(target).with_related(records).references();
        assert!(refs.source_type("Records").is_some());
    }
}
