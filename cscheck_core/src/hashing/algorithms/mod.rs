//! Built-in hash algorithm providers

use super::HashAlgorithm;
use super::registry::AlgorithmRegistry;

mod rustcrypto;

use rustcrypto::DigestAlgorithm;

/// Register all built-in algorithms with the registry
pub(crate) fn register_all(registry: &mut AlgorithmRegistry) {
    registry.register(DigestAlgorithm::<md2::Md2>::new(HashAlgorithm::MD2));
    registry.register(DigestAlgorithm::<md4::Md4>::new(HashAlgorithm::MD4));
    registry.register(DigestAlgorithm::<md5::Md5>::new(HashAlgorithm::MD5));
    registry.register(DigestAlgorithm::<gost94::Gost94CryptoPro>::new(
        HashAlgorithm::GOST3411,
    ));
    registry.register(DigestAlgorithm::<sha1::Sha1>::new(HashAlgorithm::SHA1));
    registry.register(DigestAlgorithm::<sha2::Sha224>::new(HashAlgorithm::SHA224));
    registry.register(DigestAlgorithm::<sha2::Sha256>::new(HashAlgorithm::SHA256));
    registry.register(DigestAlgorithm::<sha2::Sha384>::new(HashAlgorithm::SHA384));
    registry.register(DigestAlgorithm::<sha2::Sha512>::new(HashAlgorithm::SHA512));
    registry.register(DigestAlgorithm::<sm3::Sm3>::new(HashAlgorithm::SM3));
    registry.register(DigestAlgorithm::<ripemd::Ripemd128>::new(
        HashAlgorithm::RIPEMD128,
    ));
    registry.register(DigestAlgorithm::<ripemd::Ripemd160>::new(
        HashAlgorithm::RIPEMD160,
    ));
    registry.register(DigestAlgorithm::<ripemd::Ripemd256>::new(
        HashAlgorithm::RIPEMD256,
    ));
    registry.register(DigestAlgorithm::<ripemd::Ripemd320>::new(
        HashAlgorithm::RIPEMD320,
    ));
    registry.register(DigestAlgorithm::<tiger::Tiger>::new(HashAlgorithm::TIGER));
    registry.register(DigestAlgorithm::<whirlpool::Whirlpool>::new(
        HashAlgorithm::WHIRLPOOL,
    ));
}
