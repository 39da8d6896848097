//!
//! Digest signing bound to one key store and one crypto suite.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::context::SecurityContext;
use crate::crypto::SignatureScheme;
use crate::error::CryptoError;
use crate::hasher::CryptoHasher;
use crate::keystore::KeyStore;
use crate::primitives::{CryptoHash, Key, KeyId, Signature};
use crate::types::CryptoSuite;

/// Signs finalized digests with the private key of one `KeyStore` under
/// one immutable `CryptoSuite`.
///
/// The signer takes its own owning handle on the key store (the `Arc`
/// clone passed at construction); callers keep theirs. Identity for
/// equality and hashing is the derived public key plus the suite, never
/// object identity, so two signers over the same underlying key material
/// compare equal.
#[derive(Clone)]
pub struct Signer {
    key_store: Arc<KeyStore>,
    suite: CryptoSuite,
    scheme: Arc<dyn SignatureScheme>,
    public_key: Key,
}

impl Signer {
    /// Binds `suite` to `key_store`. Fails with `SuiteMismatch` when the
    /// key material belongs to a different signing algorithm, and with
    /// `InvalidKey` when the public bytes do not parse for the suite.
    pub fn create(
        context: &SecurityContext,
        key_store: Arc<KeyStore>,
        suite: CryptoSuite,
    ) -> Result<Self, CryptoError> {
        let scheme = context.scheme(suite)?;
        if key_store.algorithm() != suite.signing_algorithm() {
            tracing::warn!(
                requested = ?suite,
                held = ?key_store.algorithm(),
                "suite incompatible with key store material"
            );
            return Err(CryptoError::SuiteMismatch {
                expected: suite.signing_algorithm(),
                found: key_store.algorithm(),
            });
        }
        scheme.validate_public_key(key_store.public_key_bytes())?;

        let public_key = Key::new(
            key_store.algorithm(),
            key_store.public_key_bytes().to_vec(),
            key_store.digest_algorithm(),
        );
        Ok(Signer {
            key_store,
            suite,
            scheme,
            public_key,
        })
    }

    pub fn suite(&self) -> CryptoSuite {
        self.suite
    }

    /// A fresh hasher for the suite's digest algorithm. Call `init` before
    /// the first `update_bytes`.
    pub fn crypto_hasher(&self) -> CryptoHasher {
        CryptoHasher::new(self.scheme.digest_algorithm())
    }

    /// Deterministically transforms a finalized digest into a signature.
    ///
    /// Fails with `DigestMismatch` when the digest was produced under a
    /// different algorithm than the suite's, and with `NoPrivateKey` on a
    /// verify-only key store.
    pub fn sign_digest(&self, hash: &CryptoHash) -> Result<Signature, CryptoError> {
        let expected = self.scheme.digest_algorithm();
        if hash.algorithm() != expected {
            return Err(CryptoError::DigestMismatch {
                expected,
                found: hash.algorithm(),
            });
        }
        let signing_key = self
            .key_store
            .signing_key()
            .ok_or(CryptoError::NoPrivateKey(self.suite))?;
        let bytes = self.scheme.sign_digest(signing_key, hash.digest())?;
        debug_assert!(bytes.len() <= self.scheme.max_signature_len());
        Ok(Signature::new(self.suite, bytes))
    }

    /// The public key value derived from the owned key store.
    pub fn public_key(&self) -> Key {
        self.public_key.clone()
    }

    /// The key identifier alone, without copying the key bytes.
    pub fn key_id(&self) -> KeyId {
        self.public_key.id().clone()
    }

    /// Maximum signature length in bytes for the bound suite. Actual
    /// signatures may be shorter.
    pub fn signature_size(&self) -> usize {
        self.scheme.max_signature_len()
    }

    /// Borrow of the owned key store; not a new owning handle.
    pub fn key_store(&self) -> &KeyStore {
        &self.key_store
    }
}

impl PartialEq for Signer {
    fn eq(&self, other: &Self) -> bool {
        self.suite == other.suite && self.public_key == other.public_key
    }
}

impl Eq for Signer {}

impl Hash for Signer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.suite.hash(state);
        self.public_key.hash(state);
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("suite", &self.suite)
            .field("key_id", self.public_key.id())
            .finish()
    }
}
