//! Engine errors

use thiserror::Error;

use crate::compiler::CompileError;
use crate::config::ConfigError;
use crate::generator::{ShapeError, TemplateError};
use crate::vm::RuntimeError;

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Any failure of the generation pipeline or of a generated wrapper.
#[derive(Debug, Error)]
pub enum Error {
    /// The type cannot be wrapped
    #[error("unsupported type shape: {0}")]
    Shape(#[from] ShapeError),

    /// A template was instantiated with missing values
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// The generated source did not compile
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// A wrapper member failed at run time
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    /// Generator options could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),
}
