//!
//! Signature-scheme back-ends.
//!
//! Each supported `CryptoSuite` maps to one `SignatureScheme` implementation
//! that wraps the primitive library for that suite. The scheme operates on
//! raw key and digest bytes only; key-material storage and the
//! digest-accumulation protocol live elsewhere.

use std::fmt;

use crate::error::CryptoError;
use crate::types::{CryptoSuite, DigestAlgorithm};

pub mod ecdsa;
pub mod ed25519;

pub use ecdsa::EcdsaP256Sha256;
pub use ed25519::Ed25519Scheme;

/// Freshly generated key material, returned by a scheme during container
/// provisioning.
pub struct GeneratedKeyPair {
    pub signing_key: Vec<u8>,
    pub public_key: Vec<u8>,
}

impl fmt::Debug for GeneratedKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedKeyPair")
            .field("signing_key", &"<redacted>")
            .field("public_key", &self.public_key.len())
            .finish()
    }
}

/// One cryptographic suite's signing and verification behavior.
///
/// Implementations must be stateless aside from configuration; one scheme
/// instance is shared across every `Signer` and `Verifier` resolved from
/// the same `SecurityContext`.
pub trait SignatureScheme: Send + Sync + fmt::Debug {
    /// The suite this scheme implements.
    fn suite(&self) -> CryptoSuite;

    /// The digest algorithm signatures of this suite are computed over.
    fn digest_algorithm(&self) -> DigestAlgorithm {
        self.suite().digest_algorithm()
    }

    /// Upper bound on the encoded signature length in bytes. Actual
    /// signatures may be shorter under variable-length encodings.
    fn max_signature_len(&self) -> usize;

    /// Generates a fresh key pair for this suite. `key_bits` must match
    /// the suite's key size.
    fn generate_key_pair(&self, key_bits: u32) -> Result<GeneratedKeyPair, CryptoError>;

    /// Derives the encoded public key from signing-key bytes.
    fn public_key_for(&self, signing_key: &[u8]) -> Result<Vec<u8>, CryptoError>;

    /// Checks that `public_key` parses for this suite.
    fn validate_public_key(&self, public_key: &[u8]) -> Result<(), CryptoError>;

    /// Deterministically signs a finalized digest.
    fn sign_digest(&self, signing_key: &[u8], digest: &[u8]) -> Result<Vec<u8>, CryptoError>;

    /// Verifies `signature` over `digest` under `public_key`. Malformed
    /// keys or signatures verify false; this never errors.
    fn verify_digest(&self, public_key: &[u8], digest: &[u8], signature: &[u8]) -> bool;
}
