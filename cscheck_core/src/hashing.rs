//! Digest algorithms supported by cscheck
//!
//! `HashAlgorithm` is the static descriptor users select by name. The
//! registry maps each descriptor to a provider that creates streaming
//! hashers for the digest engine.

use crate::{Error, Result, error::ValidationError};
use serde::{Deserialize, Serialize};

mod algorithms;
mod registry;
mod traits;

pub use registry::AlgorithmRegistry;
pub use traits::{HashAlgorithmImpl, StreamingHasher};

/// Digest algorithms supported by the checker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashAlgorithm {
    MD2,
    MD4,
    MD5,
    /// GOST R 34.11-94 with the CryptoPro parameter set
    GOST3411,
    SHA1,
    SHA224,
    #[default]
    SHA256,
    SHA384,
    SHA512,
    SM3,
    RIPEMD128,
    RIPEMD160,
    RIPEMD256,
    RIPEMD320,
    /// Tiger/192
    TIGER,
    WHIRLPOOL,
}

impl HashAlgorithm {
    /// Every supported algorithm, in display order
    pub const ALL: [HashAlgorithm; 16] = [
        HashAlgorithm::MD2,
        HashAlgorithm::MD4,
        HashAlgorithm::MD5,
        HashAlgorithm::GOST3411,
        HashAlgorithm::SHA1,
        HashAlgorithm::SHA224,
        HashAlgorithm::SHA256,
        HashAlgorithm::SHA384,
        HashAlgorithm::SHA512,
        HashAlgorithm::SM3,
        HashAlgorithm::RIPEMD128,
        HashAlgorithm::RIPEMD160,
        HashAlgorithm::RIPEMD256,
        HashAlgorithm::RIPEMD320,
        HashAlgorithm::TIGER,
        HashAlgorithm::WHIRLPOOL,
    ];

    /// Canonical name, as accepted by [`HashAlgorithm::resolve`]
    pub fn name(self) -> &'static str {
        match self {
            HashAlgorithm::MD2 => "MD2",
            HashAlgorithm::MD4 => "MD4",
            HashAlgorithm::MD5 => "MD5",
            HashAlgorithm::GOST3411 => "GOST3411",
            HashAlgorithm::SHA1 => "SHA1",
            HashAlgorithm::SHA224 => "SHA224",
            HashAlgorithm::SHA256 => "SHA256",
            HashAlgorithm::SHA384 => "SHA384",
            HashAlgorithm::SHA512 => "SHA512",
            HashAlgorithm::SM3 => "SM3",
            HashAlgorithm::RIPEMD128 => "RIPEMD128",
            HashAlgorithm::RIPEMD160 => "RIPEMD160",
            HashAlgorithm::RIPEMD256 => "RIPEMD256",
            HashAlgorithm::RIPEMD320 => "RIPEMD320",
            HashAlgorithm::TIGER => "TIGER",
            HashAlgorithm::WHIRLPOOL => "WHIRLPOOL",
        }
    }

    /// Native digest length in bytes
    pub fn digest_len(self) -> usize {
        match self {
            HashAlgorithm::MD2
            | HashAlgorithm::MD4
            | HashAlgorithm::MD5
            | HashAlgorithm::RIPEMD128 => 16,
            HashAlgorithm::SHA1 | HashAlgorithm::RIPEMD160 => 20,
            HashAlgorithm::TIGER => 24,
            HashAlgorithm::SHA224 => 28,
            HashAlgorithm::GOST3411
            | HashAlgorithm::SHA256
            | HashAlgorithm::SM3
            | HashAlgorithm::RIPEMD256 => 32,
            HashAlgorithm::RIPEMD320 => 40,
            HashAlgorithm::SHA384 => 48,
            HashAlgorithm::SHA512 | HashAlgorithm::WHIRLPOOL => 64,
        }
    }

    /// Length of the lower-case hex rendering of a digest
    pub fn hex_len(self) -> usize {
        self.digest_len() * 2
    }

    /// Look up an algorithm by name, ignoring case
    pub fn resolve(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::Validation(ValidationError::unknown_algorithm(name)))
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::resolve(s)
    }
}

/// Digest an in-memory buffer and return the lower-case hex encoding
pub fn digest_bytes(algorithm: HashAlgorithm, data: &[u8]) -> Result<String> {
    let provider = AlgorithmRegistry::global().provider(algorithm)?;
    let mut hasher = provider.create_hasher();
    hasher.update(data);
    Ok(hex::encode(hasher.finalize()))
}
