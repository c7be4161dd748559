//! Validation related error types

use thiserror::Error;

/// Input validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Algorithm name is not in the supported set
    #[error("Unknown hashing algorithm '{name}'")]
    UnknownAlgorithm { name: String },
}

impl ValidationError {
    /// Create an unknown algorithm error
    pub fn unknown_algorithm(name: &str) -> Self {
        Self::UnknownAlgorithm {
            name: name.to_string(),
        }
    }
}
