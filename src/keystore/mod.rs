//!
//! Key-material storage behind a uniform interface.
//!
//! A `KeyStore` is an opaque, read-only holder of key material and
//! certificate metadata obtained from a `ContainerBackend`. The backend
//! owns the on-disk layout and password handling; the rest of the crate
//! only ever sees a `KeyStore`.

use std::fmt;

use crate::error::KeyStoreError;
use crate::hasher::digest_bytes;
use crate::primitives::{CryptoHash, KeyId};
use crate::types::{DigestAlgorithm, SigningAlgorithm};

pub mod file;

pub use file::FileContainer;

/// Raw key material plus certificate bytes, as yielded by a backend.
///
/// `signing_key` is absent for verify-only stores; such a store backs
/// key/key-id derivation and verification but refuses to sign.
pub struct KeyMaterial {
    algorithm: SigningAlgorithm,
    signing_key: Option<Vec<u8>>,
    public_key: Vec<u8>,
    certificate: Vec<u8>,
}

impl KeyMaterial {
    pub fn new(
        algorithm: SigningAlgorithm,
        signing_key: Option<Vec<u8>>,
        public_key: Vec<u8>,
        certificate: Vec<u8>,
    ) -> Self {
        KeyMaterial {
            algorithm,
            signing_key,
            public_key,
            certificate,
        }
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("algorithm", &self.algorithm)
            .field(
                "signing_key",
                &self.signing_key.as_ref().map(|_| "<redacted>"),
            )
            .field("public_key_len", &self.public_key.len())
            .field("certificate_len", &self.certificate.len())
            .finish()
    }
}

/// Opaque holder of private and public key material plus certificate
/// metadata. Immutable once constructed.
pub struct KeyStore {
    material: KeyMaterial,
    digest_algorithm: DigestAlgorithm,
    certificate_digest: CryptoHash,
}

impl KeyStore {
    /// Wraps backend-provided material. `digest_algorithm` governs the
    /// certificate digest and key-id derivation for this store.
    pub fn from_material(
        material: KeyMaterial,
        digest_algorithm: DigestAlgorithm,
    ) -> Result<Self, KeyStoreError> {
        if material.public_key.is_empty() {
            return Err(KeyStoreError::FormatError(
                "container holds no public key".to_string(),
            ));
        }
        let certificate_digest = CryptoHash::new(
            digest_algorithm,
            digest_bytes(digest_algorithm, &material.certificate),
        );
        Ok(KeyStore {
            material,
            digest_algorithm,
            certificate_digest,
        })
    }

    /// Digest of the DER-encoded certificate under this store's digest
    /// algorithm.
    pub fn certificate_digest(&self) -> &CryptoHash {
        &self.certificate_digest
    }

    /// The DER-encoded certificate held in the container.
    pub fn der_encoded_certificate(&self) -> &[u8] {
        &self.material.certificate
    }

    /// Identifier of the public key held in this store.
    pub fn key_id(&self) -> KeyId {
        KeyId::from_key_bytes(self.digest_algorithm, &self.material.public_key)
    }

    pub fn algorithm(&self) -> SigningAlgorithm {
        self.material.algorithm
    }

    pub fn digest_algorithm(&self) -> DigestAlgorithm {
        self.digest_algorithm
    }

    /// True when the store can back signing, not just verification.
    pub fn has_signing_key(&self) -> bool {
        self.material.signing_key.is_some()
    }

    pub(crate) fn signing_key(&self) -> Option<&[u8]> {
        self.material.signing_key.as_deref()
    }

    pub(crate) fn public_key_bytes(&self) -> &[u8] {
        &self.material.public_key
    }
}

impl fmt::Debug for KeyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyStore")
            .field("material", &self.material)
            .field("digest_algorithm", &self.digest_algorithm)
            .finish()
    }
}

/// The pluggable storage seam: opens and provisions named containers.
///
/// Implementations own the container format; opening with a wrong password,
/// a missing container, and a corrupt container must fail with the distinct
/// `KeyStoreError` variants so callers can discriminate retry-worthy from
/// fatal failures.
pub trait ContainerBackend {
    /// Opens the container at `reference`, unlocking it with `password`.
    ///
    /// Formats that seal the payload with an AEAD cannot tell a wrong
    /// password from tampered ciphertext; both surface as
    /// `AuthenticationFailure` there, and `FormatError` covers framing or
    /// encoding damage outside the sealed region.
    fn open(
        &self,
        reference: &str,
        password: &str,
        digest_algorithm: DigestAlgorithm,
    ) -> Result<KeyStore, KeyStoreError>;

    /// Provisions a new container with freshly generated key material and
    /// a self-signed certificate for `subject`.
    fn create(
        &self,
        reference: &str,
        password: &str,
        subject: &str,
        algorithm: SigningAlgorithm,
        key_bits: u32,
        validity_days: u32,
    ) -> Result<(), KeyStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_store_rejects_empty_public_key() {
        let material = KeyMaterial::new(SigningAlgorithm::Ecdsa, None, Vec::new(), vec![0x30]);
        assert!(matches!(
            KeyStore::from_material(material, DigestAlgorithm::Sha256),
            Err(KeyStoreError::FormatError(_))
        ));
    }

    #[test]
    fn certificate_digest_matches_one_shot() {
        let certificate = vec![0x30, 0x03, 0x02, 0x01, 0x01];
        let material = KeyMaterial::new(
            SigningAlgorithm::Ecdsa,
            None,
            vec![4u8; 33],
            certificate.clone(),
        );
        let store = KeyStore::from_material(material, DigestAlgorithm::Sha256).unwrap();
        assert_eq!(
            store.certificate_digest().digest(),
            digest_bytes(DigestAlgorithm::Sha256, &certificate).as_slice()
        );
        assert_eq!(store.certificate_digest().algorithm(), DigestAlgorithm::Sha256);
    }

    #[test]
    fn verify_only_store_reports_no_signing_key() {
        let material = KeyMaterial::new(SigningAlgorithm::Ecdsa, None, vec![4u8; 33], vec![0x30]);
        let store = KeyStore::from_material(material, DigestAlgorithm::Sha256).unwrap();
        assert!(!store.has_signing_key());
        assert!(store.signing_key().is_none());
    }

    #[test]
    fn debug_redacts_signing_key() {
        let material = KeyMaterial::new(
            SigningAlgorithm::Ecdsa,
            Some(vec![7u8; 32]),
            vec![4u8; 33],
            vec![0x30],
        );
        let rendered = format!("{material:?}");
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains('7'));
    }
}
