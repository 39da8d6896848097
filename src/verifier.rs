//!
//! In-memory verification registry.
//!
//! A `Verifier` maps key identifiers to registered public keys and checks
//! digest/signature pairs against them. "Did not verify" is an expected
//! outcome and is always reported as `false`, never as an error; the
//! individual rejection reasons are logged at debug level.

use std::collections::HashMap;

use crate::context::SecurityContext;
use crate::primitives::{CryptoHash, Key, KeyId, Signature};
use crate::types::CryptoSuite;

/// Registry of public keys, keyed by `KeyId`.
#[derive(Debug, Clone)]
pub struct Verifier {
    context: SecurityContext,
    registry: HashMap<KeyId, Key>,
}

impl Verifier {
    /// An empty registry resolving suites from `context`.
    pub fn new(context: &SecurityContext) -> Self {
        Verifier {
            context: context.clone(),
            registry: HashMap::new(),
        }
    }

    /// Registers `key` under its identifier. Re-adding a key id replaces
    /// the earlier entry; duplicates are not an error.
    pub fn add_key(&mut self, key: Key) {
        self.registry.insert(key.id().clone(), key);
    }

    /// The key currently registered under `key_id`, if any.
    pub fn key(&self, key_id: &KeyId) -> Option<&Key> {
        self.registry.get(key_id)
    }

    /// Number of registered keys.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Verifies `signature` over `hash` against the key registered under
    /// `key_id`, under the stated `suite`.
    ///
    /// Returns `true` only on a cryptographically valid match. An
    /// unregistered key id, a suite incompatible with the registered key,
    /// a digest from a different algorithm, or a signature tagged with a
    /// different suite all verify `false`.
    pub fn verify_digest(
        &self,
        key_id: &KeyId,
        hash: &CryptoHash,
        suite: CryptoSuite,
        signature: &Signature,
    ) -> bool {
        let Some(key) = self.registry.get(key_id) else {
            tracing::debug!(?key_id, "verify rejected: unregistered key id");
            return false;
        };
        if key.algorithm() != suite.signing_algorithm() {
            tracing::debug!(
                ?suite,
                key_algorithm = ?key.algorithm(),
                "verify rejected: suite incompatible with registered key"
            );
            return false;
        }
        if signature.suite() != suite {
            tracing::debug!(
                ?suite,
                signature_suite = ?signature.suite(),
                "verify rejected: signature produced under a different suite"
            );
            return false;
        }
        let Ok(scheme) = self.context.scheme(suite) else {
            tracing::debug!(?suite, "verify rejected: no scheme registered for suite");
            return false;
        };
        if hash.algorithm() != scheme.digest_algorithm() {
            tracing::debug!(
                expected = ?scheme.digest_algorithm(),
                found = ?hash.algorithm(),
                "verify rejected: digest algorithm mismatch"
            );
            return false;
        }
        scheme.verify_digest(key.bytes(), hash.digest(), signature.bytes())
    }
}
