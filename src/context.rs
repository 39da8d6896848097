//!
//! Explicit security context replacing process-global subsystem init.
//!
//! A `SecurityContext` carries the suite registry that `Signer` and
//! `Verifier` resolve back-ends from. Contexts are cheap to clone and fully
//! independent, so tests and embedders can run several side by side.

use std::collections::HashMap;
use std::sync::Arc;

use crate::crypto::{EcdsaP256Sha256, Ed25519Scheme, SignatureScheme};
use crate::error::CryptoError;
use crate::types::CryptoSuite;

/// Registry mapping crypto suites to their signature-scheme back-ends.
#[derive(Debug, Clone)]
pub struct SecurityContext {
    schemes: Arc<HashMap<CryptoSuite, Arc<dyn SignatureScheme>>>,
}

impl SecurityContext {
    /// A context with the built-in suites registered.
    pub fn new() -> Self {
        let mut schemes: HashMap<CryptoSuite, Arc<dyn SignatureScheme>> = HashMap::new();
        schemes.insert(CryptoSuite::EcdsaSha256, Arc::new(EcdsaP256Sha256));
        schemes.insert(CryptoSuite::Ed25519, Arc::new(Ed25519Scheme));
        SecurityContext {
            schemes: Arc::new(schemes),
        }
    }

    /// Registers `scheme` under its declared suite. A previously registered
    /// scheme for the same suite is replaced. Handles cloned from this
    /// context before the call are unaffected.
    pub fn register(&mut self, scheme: Arc<dyn SignatureScheme>) {
        let suite = scheme.suite();
        Arc::make_mut(&mut self.schemes).insert(suite, scheme);
    }

    /// Resolves the scheme for `suite`.
    pub fn scheme(&self, suite: CryptoSuite) -> Result<Arc<dyn SignatureScheme>, CryptoError> {
        self.schemes
            .get(&suite)
            .cloned()
            .ok_or(CryptoError::UnsupportedSuite(suite as u8))
    }
}

impl Default for SecurityContext {
    fn default() -> Self {
        Self::new()
    }
}
