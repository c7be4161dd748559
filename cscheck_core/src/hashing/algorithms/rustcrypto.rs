//! Adapter from RustCrypto `Digest` implementations to the provider traits

use crate::hashing::HashAlgorithm;
use crate::hashing::traits::{HashAlgorithmImpl, StreamingHasher};
use sha2::Digest;
use std::marker::PhantomData;

/// Provider backed by any RustCrypto digest type
pub(crate) struct DigestAlgorithm<D> {
    algorithm: HashAlgorithm,
    _digest: PhantomData<fn() -> D>,
}

impl<D> DigestAlgorithm<D> {
    pub(crate) fn new(algorithm: HashAlgorithm) -> Self {
        Self {
            algorithm,
            _digest: PhantomData,
        }
    }
}

/// Streaming hasher wrapping a RustCrypto digest state
struct DigestStreamingHasher<D> {
    hasher: D,
}

impl<D> StreamingHasher for DigestStreamingHasher<D>
where
    D: Digest + Send,
{
    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.hasher, data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        Digest::finalize(self.hasher).to_vec()
    }
}

impl<D> HashAlgorithmImpl for DigestAlgorithm<D>
where
    D: Digest + Send + 'static,
{
    fn id(&self) -> &'static str {
        self.algorithm.name()
    }

    fn create_hasher(&self) -> Box<dyn StreamingHasher> {
        Box::new(DigestStreamingHasher { hasher: D::new() })
    }

    fn output_size(&self) -> usize {
        <D as Digest>::output_size()
    }
}
