//!
//! Error taxonomy for the signature subsystem.
//!
//! Key-store construction failures carry enough discrimination for callers
//! to tell retry-worthy conditions (wrong password) from fatal ones (missing
//! or corrupt container). "Signature did not verify" is an expected outcome
//! and is reported as a boolean by `Verifier`, never through these types.

use crate::types::{CryptoSuite, DigestAlgorithm, SigningAlgorithm};

/// Errors raised while opening or provisioning a key-store container.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyStoreError {
    /// The container exists and parsed, but the password did not unlock it.
    #[error("container authentication failed (wrong password)")]
    AuthenticationFailure,
    /// No container exists at the given reference.
    #[error("container not found")]
    ContainerNotFound,
    /// The container bytes are not a supported container format.
    #[error("unparsable container: {0}")]
    FormatError(String),
    /// An underlying I/O failure that is neither "missing" nor "corrupt".
    #[error("container I/O failure: {0}")]
    Io(String),
    /// A cryptographic operation failed while provisioning or unsealing.
    #[error("container crypto failure: {0}")]
    Crypto(#[from] CryptoError),
}

/// Errors raised by hashing, signing, and suite resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CryptoError {
    /// The requested suite is incompatible with the key material.
    #[error("suite requires {expected:?} key material, key store holds {found:?}")]
    SuiteMismatch {
        expected: SigningAlgorithm,
        found: SigningAlgorithm,
    },
    /// The digest was produced under a different algorithm than the suite's.
    #[error("suite expects a {expected:?} digest, got {found:?}")]
    DigestMismatch {
        expected: DigestAlgorithm,
        found: DigestAlgorithm,
    },
    /// Signing was attempted on a verify-only key store.
    #[error("key store holds no private key (suite {0:?})")]
    NoPrivateKey(CryptoSuite),
    /// No scheme is registered for the given suite tag.
    #[error("no signature scheme registered for suite tag {0}")]
    UnsupportedSuite(u8),
    /// An algorithm tag did not decode to a known variant.
    #[error("unknown algorithm tag {0}")]
    UnsupportedAlgorithm(u8),
    /// Key bytes did not parse for the expected algorithm.
    #[error("invalid key material: {0}")]
    InvalidKey(String),
    /// Signature bytes did not decode for the expected algorithm.
    #[error("invalid signature encoding")]
    InvalidSignatureEncoding,
    /// The primitive library rejected a signing operation.
    #[error("signing failed: {0}")]
    SigningFailure(String),
    /// An operation was invoked in a state that forbids it, such as
    /// updating a hasher after finalization. A caller bug, not a
    /// recoverable runtime condition.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
}
