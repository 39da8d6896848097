//!
//! Password-sealed file container backend.
//!
//! Container layout: `magic || version || salt(16) || nonce(12) || sealed`,
//! where `sealed` is the DER-encoded payload encrypted with
//! ChaCha20-Poly1305 under a key derived from the password via
//! PBKDF2-HMAC-SHA256. The AEAD tag is what makes a wrong password
//! distinguishable from a corrupt container: framing damage surfaces as
//! `FormatError`, an unseal failure as `AuthenticationFailure`.

use std::io::ErrorKind;
use std::time::{SystemTime, UNIX_EPOCH};

use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Key, Nonce,
};
use der::asn1::OctetString;
use der::{Decode, Encode};
use pbkdf2::pbkdf2_hmac;
use rand_core::{OsRng, RngCore};
use sha2::Sha256;

use super::{ContainerBackend, KeyMaterial, KeyStore};
use crate::context::SecurityContext;
use crate::error::KeyStoreError;
use crate::hasher::digest_bytes;
use crate::types::{CryptoSuite, DigestAlgorithm, SigningAlgorithm};

const MAGIC: &[u8; 4] = b"SGNT";
const VERSION: u8 = 1;
const SALT_LEN: usize = 16;
const NONCE_LEN: usize = 12;
const HEADER_LEN: usize = MAGIC.len() + 1 + SALT_LEN + NONCE_LEN;

/// PBKDF2 iteration count for the sealed container key.
const PBKDF2_ITERATIONS: u32 = 100_000;

/// The signed portion of a container certificate.
#[derive(Debug, Clone, PartialEq, Eq, der::Sequence)]
pub struct TbsCertificate {
    pub serial: u64,
    pub subject: String,
    /// Validity window as seconds since the Unix epoch.
    pub not_before: u64,
    pub not_after: u64,
    pub algorithm: u8,
    pub public_key: OctetString,
}

/// Minimal self-signed certificate stored alongside the key material.
///
/// Carries enough for digesting and DER export; chain building and
/// validation are out of scope.
#[derive(Debug, Clone, PartialEq, Eq, der::Sequence)]
pub struct SelfSignedCertificate {
    pub tbs: TbsCertificate,
    pub signature: OctetString,
}

/// Sealed container payload. An empty `signing_key` marks a verify-only
/// container.
#[derive(der::Sequence)]
struct ContainerPayload {
    algorithm: u8,
    signing_key: OctetString,
    public_key: OctetString,
    certificate: OctetString,
}

fn suite_for(algorithm: SigningAlgorithm) -> CryptoSuite {
    match algorithm {
        SigningAlgorithm::Ecdsa => CryptoSuite::EcdsaSha256,
        SigningAlgorithm::Ed25519 => CryptoSuite::Ed25519,
    }
}

fn derive_container_key(password: &str, salt: &[u8]) -> [u8; 32] {
    let mut key = [0u8; 32];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut key);
    key
}

fn format_err(e: impl std::fmt::Display) -> KeyStoreError {
    KeyStoreError::FormatError(e.to_string())
}

/// File-based `ContainerBackend` sealing key material under a password.
#[derive(Debug, Clone, Default)]
pub struct FileContainer {
    context: SecurityContext,
}

impl FileContainer {
    pub fn new(context: SecurityContext) -> Self {
        FileContainer { context }
    }

    /// Unseals a container from raw bytes. `open` delegates here after
    /// reading the file; embedders holding containers in memory can call
    /// it directly.
    pub fn open_bytes(
        &self,
        bytes: &[u8],
        password: &str,
        digest_algorithm: DigestAlgorithm,
    ) -> Result<KeyStore, KeyStoreError> {
        if bytes.len() < HEADER_LEN {
            return Err(KeyStoreError::FormatError(
                "truncated container header".to_string(),
            ));
        }
        let (magic, rest) = bytes.split_at(MAGIC.len());
        if magic != MAGIC {
            return Err(KeyStoreError::FormatError(
                "bad container magic".to_string(),
            ));
        }
        let (version, rest) = rest.split_at(1);
        if version[0] != VERSION {
            return Err(KeyStoreError::FormatError(format!(
                "unsupported container version {}",
                version[0]
            )));
        }
        let (salt, rest) = rest.split_at(SALT_LEN);
        let (nonce, sealed) = rest.split_at(NONCE_LEN);

        let key = derive_container_key(password, salt);
        let cipher = ChaCha20Poly1305::new(Key::from_slice(&key));
        let plaintext = cipher
            .decrypt(Nonce::from_slice(nonce), sealed)
            .map_err(|_| KeyStoreError::AuthenticationFailure)?;

        let payload = ContainerPayload::from_der(&plaintext).map_err(format_err)?;
        let algorithm = SigningAlgorithm::try_from(payload.algorithm)
            .map_err(|_| format_err(format!("unknown algorithm tag {}", payload.algorithm)))?;

        let signing_key = payload.signing_key.as_bytes();
        let signing_key = if signing_key.is_empty() {
            None
        } else {
            Some(signing_key.to_vec())
        };

        let material = KeyMaterial::new(
            algorithm,
            signing_key,
            payload.public_key.as_bytes().to_vec(),
            payload.certificate.as_bytes().to_vec(),
        );
        KeyStore::from_material(material, digest_algorithm)
    }

    fn seal(&self, payload: &ContainerPayload, password: &str) -> Result<Vec<u8>, KeyStoreError> {
        let mut salt = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);
        let mut nonce = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce);

        let plaintext = payload.to_der().map_err(format_err)?;
        let key = derive_container_key(password, &salt);
        let cipher = ChaCha20Poly1305::new(Key::from_slice(&key));
        let sealed = cipher
            .encrypt(Nonce::from_slice(&nonce), plaintext.as_slice())
            .map_err(|_| KeyStoreError::Io("container seal failed".to_string()))?;

        let mut out = Vec::with_capacity(HEADER_LEN + sealed.len());
        out.extend_from_slice(MAGIC);
        out.push(VERSION);
        out.extend_from_slice(&salt);
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&sealed);
        Ok(out)
    }

    fn build_certificate(
        &self,
        subject: &str,
        algorithm: SigningAlgorithm,
        signing_key: &[u8],
        public_key: &[u8],
        validity_days: u32,
    ) -> Result<SelfSignedCertificate, KeyStoreError> {
        let suite = suite_for(algorithm);
        let scheme = self.context.scheme(suite)?;

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| KeyStoreError::Io(e.to_string()))?
            .as_secs();
        let tbs = TbsCertificate {
            serial: OsRng.next_u64(),
            subject: subject.to_string(),
            not_before: now,
            not_after: now + u64::from(validity_days) * 86_400,
            algorithm: algorithm as u8,
            public_key: OctetString::new(public_key.to_vec()).map_err(format_err)?,
        };

        let tbs_der = tbs.to_der().map_err(format_err)?;
        let tbs_digest = digest_bytes(suite.digest_algorithm(), &tbs_der);
        let signature = scheme.sign_digest(signing_key, &tbs_digest)?;

        Ok(SelfSignedCertificate {
            tbs,
            signature: OctetString::new(signature).map_err(format_err)?,
        })
    }
}

impl ContainerBackend for FileContainer {
    fn open(
        &self,
        reference: &str,
        password: &str,
        digest_algorithm: DigestAlgorithm,
    ) -> Result<KeyStore, KeyStoreError> {
        let bytes = std::fs::read(reference).map_err(|e| match e.kind() {
            ErrorKind::NotFound => KeyStoreError::ContainerNotFound,
            _ => KeyStoreError::Io(e.to_string()),
        })?;
        tracing::debug!(reference, len = bytes.len(), "opening key container");
        self.open_bytes(&bytes, password, digest_algorithm)
    }

    fn create(
        &self,
        reference: &str,
        password: &str,
        subject: &str,
        algorithm: SigningAlgorithm,
        key_bits: u32,
        validity_days: u32,
    ) -> Result<(), KeyStoreError> {
        let suite = suite_for(algorithm);
        let scheme = self.context.scheme(suite)?;
        let pair = scheme.generate_key_pair(key_bits)?;

        let certificate = self.build_certificate(
            subject,
            algorithm,
            &pair.signing_key,
            &pair.public_key,
            validity_days,
        )?;
        let certificate_der = certificate.to_der().map_err(format_err)?;

        let payload = ContainerPayload {
            algorithm: algorithm as u8,
            signing_key: OctetString::new(pair.signing_key).map_err(format_err)?,
            public_key: OctetString::new(pair.public_key).map_err(format_err)?,
            certificate: OctetString::new(certificate_der).map_err(format_err)?,
        };

        let bytes = self.seal(&payload, password)?;
        std::fs::write(reference, bytes).map_err(|e| KeyStoreError::Io(e.to_string()))?;
        tracing::debug!(reference, subject, ?algorithm, "provisioned key container");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_container(name: &str) -> (tempfile::TempDir, String) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(name).to_string_lossy().into_owned();
        (dir, path)
    }

    fn create_default(path: &str, password: &str, algorithm: SigningAlgorithm) {
        let backend = FileContainer::default();
        backend
            .create(path, password, "alice", algorithm, 256, 365)
            .expect("create container");
    }

    #[test]
    fn create_open_roundtrip_ecdsa() {
        let (_dir, path) = temp_container("store.sgnt");
        create_default(&path, "blueberry", SigningAlgorithm::Ecdsa);

        let backend = FileContainer::default();
        let store = backend
            .open(&path, "blueberry", DigestAlgorithm::Sha256)
            .unwrap();
        assert_eq!(store.algorithm(), SigningAlgorithm::Ecdsa);
        assert!(store.has_signing_key());
        assert!(!store.der_encoded_certificate().is_empty());
    }

    #[test]
    fn create_open_roundtrip_ed25519() {
        let (_dir, path) = temp_container("store.sgnt");
        create_default(&path, "blueberry", SigningAlgorithm::Ed25519);

        let backend = FileContainer::default();
        let store = backend
            .open(&path, "blueberry", DigestAlgorithm::Sha256)
            .unwrap();
        assert_eq!(store.algorithm(), SigningAlgorithm::Ed25519);
        assert!(store.has_signing_key());
    }

    #[test]
    fn wrong_password_is_authentication_failure() {
        let (_dir, path) = temp_container("store.sgnt");
        create_default(&path, "blueberry", SigningAlgorithm::Ecdsa);

        let backend = FileContainer::default();
        let err = backend
            .open(&path, "rhubarb", DigestAlgorithm::Sha256)
            .unwrap_err();
        assert_eq!(err, KeyStoreError::AuthenticationFailure);
    }

    #[test]
    fn missing_container_is_not_found() {
        let (_dir, path) = temp_container("absent.sgnt");
        let backend = FileContainer::default();
        let err = backend
            .open(&path, "blueberry", DigestAlgorithm::Sha256)
            .unwrap_err();
        assert_eq!(err, KeyStoreError::ContainerNotFound);
    }

    #[test]
    fn bad_magic_is_format_error() {
        let (_dir, path) = temp_container("store.sgnt");
        create_default(&path, "blueberry", SigningAlgorithm::Ecdsa);

        let mut bytes = std::fs::read(&path).unwrap();
        bytes[0] ^= 0xff;

        let backend = FileContainer::default();
        let err = backend
            .open_bytes(&bytes, "blueberry", DigestAlgorithm::Sha256)
            .unwrap_err();
        assert!(matches!(err, KeyStoreError::FormatError(_)));
    }

    #[test]
    fn truncated_container_is_format_error() {
        let backend = FileContainer::default();
        let err = backend
            .open_bytes(&[0u8; 8], "blueberry", DigestAlgorithm::Sha256)
            .unwrap_err();
        assert!(matches!(err, KeyStoreError::FormatError(_)));
    }

    #[test]
    fn tampered_ciphertext_is_authentication_failure() {
        let (_dir, path) = temp_container("store.sgnt");
        create_default(&path, "blueberry", SigningAlgorithm::Ecdsa);

        let mut bytes = std::fs::read(&path).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;

        let backend = FileContainer::default();
        let err = backend
            .open_bytes(&bytes, "blueberry", DigestAlgorithm::Sha256)
            .unwrap_err();
        assert_eq!(err, KeyStoreError::AuthenticationFailure);
    }

    #[test]
    fn certificate_is_self_signed_over_tbs() {
        let (_dir, path) = temp_container("store.sgnt");
        create_default(&path, "blueberry", SigningAlgorithm::Ecdsa);

        let backend = FileContainer::default();
        let store = backend
            .open(&path, "blueberry", DigestAlgorithm::Sha256)
            .unwrap();

        let certificate =
            SelfSignedCertificate::from_der(store.der_encoded_certificate()).unwrap();
        assert_eq!(certificate.tbs.subject, "alice");
        assert_eq!(certificate.tbs.algorithm, SigningAlgorithm::Ecdsa as u8);
        assert!(certificate.tbs.not_after > certificate.tbs.not_before);

        let context = SecurityContext::new();
        let scheme = context.scheme(CryptoSuite::EcdsaSha256).unwrap();
        let tbs_der = certificate.tbs.to_der().unwrap();
        let tbs_digest = digest_bytes(DigestAlgorithm::Sha256, &tbs_der);
        assert!(scheme.verify_digest(
            certificate.tbs.public_key.as_bytes(),
            &tbs_digest,
            certificate.signature.as_bytes(),
        ));
    }

    #[test]
    fn independent_opens_yield_identical_key_material() {
        let (_dir, path) = temp_container("store.sgnt");
        create_default(&path, "blueberry", SigningAlgorithm::Ecdsa);

        let backend = FileContainer::default();
        let a = backend
            .open(&path, "blueberry", DigestAlgorithm::Sha256)
            .unwrap();
        let b = backend
            .open(&path, "blueberry", DigestAlgorithm::Sha256)
            .unwrap();
        assert_eq!(a.key_id(), b.key_id());
        assert_eq!(a.certificate_digest(), b.certificate_digest());
    }
}
