//! Error types for the cscheck core library
//!
//! Errors are grouped the same way the hashing pipeline fails: reading the
//! file, validating user input, and library internals.

use thiserror::Error;

pub mod internal;
pub mod io;
pub mod validation;

pub use self::io::{IoError, IoErrorKind};
pub use self::validation::ValidationError;
pub use internal::InternalError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the cscheck core library
///
/// - I/O errors: the target file is missing, unreadable or fails mid-stream
/// - Validation errors: unknown algorithm names and similar input problems
/// - Internal errors: missing algorithm providers, dead workers
#[derive(Error, Debug)]
pub enum Error {
    /// I/O related errors
    #[error(transparent)]
    Io(#[from] IoError),

    /// Validation related errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Internal library errors
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io(IoError::from_std(source))
    }
}

impl Error {
    /// Whether this error came from reading the target file
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
