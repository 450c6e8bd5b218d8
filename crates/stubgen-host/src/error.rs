//! Host errors

use stubgen_engine::RuntimeError;
use thiserror::Error;

/// Errors raised by the host layer
#[derive(Debug, Error)]
pub enum HostError {
    /// Generation or compilation failed
    #[error(transparent)]
    Engine(#[from] stubgen_engine::Error),

    /// A wrapper or source member failed
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    /// The compiled artifact does not contain the expected wrapper class
    #[error("artifact '{artifact}' has no class '{class}'")]
    MissingClass {
        /// Artifact name
        artifact: String,
        /// Requested class
        class: String,
    },

    /// I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record list did not survive a save/load round trip
    #[error("verification failed: {0}")]
    Verification(String),
}

/// Result type for host operations
pub type HostResult<T> = std::result::Result<T, HostError>;
