//! Provider traits behind the algorithm registry

/// Provider of one digest algorithm
pub trait HashAlgorithmImpl: Send + Sync {
    /// Canonical algorithm name
    fn id(&self) -> &'static str;

    /// Create a new streaming hasher instance
    fn create_hasher(&self) -> Box<dyn StreamingHasher>;

    /// Digest length in bytes
    fn output_size(&self) -> usize;
}

/// Incremental digest accumulator, owned by a single job
pub trait StreamingHasher: Send {
    /// Update the hasher with new data
    fn update(&mut self, data: &[u8]);

    /// Finalize the digest and return its raw bytes
    fn finalize(self: Box<Self>) -> Vec<u8>;
}
