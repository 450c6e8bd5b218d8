//! Stub generator engine
//!
//! Generates delegating wrapper classes from structural type descriptions:
//! - **Descriptors**: the members of the type to wrap (`descriptor` module)
//! - **Generator**: classification, templates and source emission (`generator` module)
//! - **Parser**: lexer and parser for the stub language (`parser` module)
//! - **Compiler**: checking against reference units and lowering (`compiler` module)
//! - **VM**: values, source objects, indexed accessors and wrapper instances (`vm` module)
//!
//! # Example
//!
//! ```rust,ignore
//! use stubgen_engine::{PropertyDescriptor, StubGenerator, TypeDescriptor, TypeRef};
//!
//! let target = TypeDescriptor::new("Mock")
//!     .with_property(PropertyDescriptor::new("Name", TypeRef::String).read_write());
//!
//! let artifact = StubGenerator::new(target).compile()?;
//! let wrapper = artifact.class("MockWrapper").unwrap().instantiate(source)?;
//! wrapper.set("Name", "renamed")?;
//! ```

#![warn(rust_2018_idioms)]

pub mod compiler;
pub mod config;
pub mod descriptor;
pub mod diagnostic;
pub mod error;
pub mod generator;
pub mod parser;
pub mod vm;

pub use compiler::{
    ArtifactName, Backend, CompileError, CompiledArtifact, Compiler, ReferenceUnit, References,
};
pub use config::{ConfigError, GeneratorOptions, CONFIG_FILE_NAME};
pub use descriptor::{
    MethodDescriptor, ParamMode, ParameterDescriptor, PropertyDescriptor, TypeDescriptor, TypeRef,
};
pub use diagnostic::{Diagnostic, ErrorCode};
pub use error::{Error, Result};
pub use generator::{
    classify, format, ClassifiedMembers, GeneratedSource, ShapeError, SourceEmitter,
    StubGenerator, TemplateContext, TemplateError,
};
pub use vm::{
    object_ref, IndexedAccessor, Object, ObjectRef, RuntimeError, Value, Wrapper, WrapperClass,
};
