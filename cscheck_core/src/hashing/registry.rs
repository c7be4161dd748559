//! Central registry for hash algorithm providers

use super::HashAlgorithm;
use super::traits::HashAlgorithmImpl;
use crate::{Error, Result, error::InternalError};
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::sync::Arc;

/// Maps algorithm descriptors to the providers that implement them
pub struct AlgorithmRegistry {
    algorithms: HashMap<&'static str, Arc<dyn HashAlgorithmImpl>>,
}

impl AlgorithmRegistry {
    /// Create a registry without any providers
    pub fn empty() -> Self {
        Self {
            algorithms: HashMap::new(),
        }
    }

    /// Create a registry holding every built-in provider
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        super::algorithms::register_all(&mut registry);
        registry
    }

    /// Get the global registry instance
    pub fn global() -> Arc<Self> {
        static INSTANCE: OnceCell<Arc<AlgorithmRegistry>> = OnceCell::new();
        Arc::clone(INSTANCE.get_or_init(|| Arc::new(Self::builtin())))
    }

    /// Register a provider, replacing any previous one with the same id
    pub fn register(&mut self, algorithm: impl HashAlgorithmImpl + 'static) {
        self.algorithms.insert(algorithm.id(), Arc::new(algorithm));
    }

    /// Get the provider for an algorithm, if registered
    pub fn get(&self, algorithm: HashAlgorithm) -> Option<Arc<dyn HashAlgorithmImpl>> {
        self.algorithms.get(algorithm.name()).cloned()
    }

    /// Get the provider for an algorithm or fail with `AlgorithmUnavailable`
    pub fn provider(&self, algorithm: HashAlgorithm) -> Result<Arc<dyn HashAlgorithmImpl>> {
        self.get(algorithm).ok_or_else(|| {
            Error::Internal(InternalError::algorithm_unavailable(algorithm.name()))
        })
    }

    /// List registered algorithm ids, sorted
    pub fn list(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.algorithms.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_covers_every_algorithm() {
        let registry = AlgorithmRegistry::global();

        for algorithm in HashAlgorithm::ALL {
            let provider = registry.provider(algorithm).unwrap();
            assert_eq!(provider.id(), algorithm.name());
            assert_eq!(provider.output_size(), algorithm.digest_len());
        }
        assert_eq!(registry.list().len(), HashAlgorithm::ALL.len());
    }

    #[test]
    fn test_empty_registry_reports_unavailable() {
        let registry = AlgorithmRegistry::empty();

        assert!(registry.get(HashAlgorithm::SHA256).is_none());
        match registry.provider(HashAlgorithm::SHA256) {
            Err(Error::Internal(InternalError::AlgorithmUnavailable { algorithm })) => {
                assert_eq!(algorithm, "SHA256")
            }
            other => panic!("Expected AlgorithmUnavailable, got {:?}", other.err()),
        }
    }
}
