//!
//! Immutable value objects flowing through the sign/verify pipeline.
//!
//! `CryptoHash` is produced by a `CryptoHasher`, `Signature` by a `Signer`,
//! and `Key`/`KeyId` are derived from a key store's public material. All of
//! them are plain owned values: `Clone` is the logical duplicate and `Drop`
//! the release, so lifecycle bugs of the acquire/release flavor cannot be
//! expressed.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::hasher::digest_bytes;
use crate::types::{CryptoSuite, DigestAlgorithm, SigningAlgorithm};

fn fmt_hex(bytes: &[u8], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for b in bytes {
        write!(f, "{b:02x}")?;
    }
    Ok(())
}

/// A digest paired with the algorithm that produced it.
#[derive(Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct CryptoHash {
    algorithm: DigestAlgorithm,
    #[serde(with = "serde_bytes")]
    digest: Vec<u8>,
}

impl CryptoHash {
    pub fn new(algorithm: DigestAlgorithm, digest: Vec<u8>) -> Self {
        CryptoHash { algorithm, digest }
    }

    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    pub fn digest(&self) -> &[u8] {
        &self.digest
    }
}

impl fmt::Debug for CryptoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CryptoHash({:?}, ", self.algorithm)?;
        fmt_hex(&self.digest, f)?;
        write!(f, ")")
    }
}

/// A digest uniquely identifying a public key.
///
/// Derived by hashing the key bytes, so it is stable for the same key
/// material across processes. Used as the lookup key in a `Verifier`
/// registry.
#[derive(Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct KeyId(CryptoHash);

impl KeyId {
    /// Derives the identifier for `key_bytes` under `algorithm`.
    pub fn from_key_bytes(algorithm: DigestAlgorithm, key_bytes: &[u8]) -> Self {
        KeyId(CryptoHash::new(algorithm, digest_bytes(algorithm, key_bytes)))
    }

    pub fn digest(&self) -> &CryptoHash {
        &self.0
    }
}

impl fmt::Debug for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyId(")?;
        fmt_hex(self.0.digest(), f)?;
        write!(f, ")")
    }
}

/// Signature bytes tagged with the suite that produced them.
///
/// The byte length is bounded by the suite's maximum encoded size (72 for
/// ECDSA-P256 DER), not fixed; callers must treat it as `len <= bound`.
#[derive(Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Signature {
    suite: CryptoSuite,
    #[serde(with = "serde_bytes")]
    bytes: Vec<u8>,
}

impl Signature {
    pub fn new(suite: CryptoSuite, bytes: Vec<u8>) -> Self {
        Signature { suite, bytes }
    }

    pub fn suite(&self) -> CryptoSuite {
        self.suite
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({:?}, ", self.suite)?;
        fmt_hex(&self.bytes, f)?;
        write!(f, ")")
    }
}

/// A public key value: encoded key bytes, derived identifier, and the
/// signing algorithm the bytes belong to.
///
/// Two `Key`s are equal iff their bytes and algorithm are equal; the id is
/// derived and does not participate.
#[derive(Clone, serde::Serialize, serde::Deserialize)]
pub struct Key {
    algorithm: SigningAlgorithm,
    #[serde(with = "serde_bytes")]
    bytes: Vec<u8>,
    id: KeyId,
}

impl Key {
    /// Builds a key value, deriving the id from the key bytes under
    /// `id_algorithm`.
    pub fn new(algorithm: SigningAlgorithm, bytes: Vec<u8>, id_algorithm: DigestAlgorithm) -> Self {
        let id = KeyId::from_key_bytes(id_algorithm, &bytes);
        Key {
            algorithm,
            bytes,
            id,
        }
    }

    pub fn algorithm(&self) -> SigningAlgorithm {
        self.algorithm
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn id(&self) -> &KeyId {
        &self.id
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.algorithm == other.algorithm && self.bytes == other.bytes
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.algorithm.hash(state);
        self.bytes.hash(state);
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({:?}, ", self.algorithm)?;
        fmt_hex(&self.bytes, f)?;
        write!(f, ", {:?})", self.id)
    }
}
