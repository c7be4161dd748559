//! Internal library error types

use thiserror::Error;

/// Internal library errors
#[derive(Error, Debug)]
pub enum InternalError {
    /// The registry has no provider for a supported algorithm
    #[error("Hash algorithm '{algorithm}' is not available from any provider")]
    AlgorithmUnavailable { algorithm: String },

    /// A hashing worker stopped without reporting a result
    #[error("Hashing worker failed: {message}")]
    WorkerFailed { message: String },
}

impl InternalError {
    /// Create an algorithm unavailable error
    pub fn algorithm_unavailable(algorithm: &str) -> Self {
        Self::AlgorithmUnavailable {
            algorithm: algorithm.to_string(),
        }
    }

    /// Create a worker failure error
    pub fn worker_failed(message: impl Into<String>) -> Self {
        Self::WorkerFailed {
            message: message.into(),
        }
    }
}
