//! Reference hash comparison

use serde::{Deserialize, Serialize};

/// Result of comparing a reference hash with a generated digest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    Match,
    Mismatch,
}

/// Compare a user-supplied reference hash with a generated hex digest.
///
/// Both sides are lower-cased; otherwise the comparison is exact.
pub fn compare(reference: &str, generated: &str) -> Comparison {
    if reference.to_lowercase() == generated.to_lowercase() {
        Comparison::Match
    } else {
        Comparison::Mismatch
    }
}
