//!
//! ECDSA-P256 over SHA-256 digests, with DER-encoded signatures.

use ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use p256::ecdsa::{Signature as P256Signature, SigningKey, VerifyingKey};
use p256::SecretKey as P256SecretKey;
use rand_core::OsRng;

use super::{GeneratedKeyPair, SignatureScheme};
use crate::error::CryptoError;
use crate::types::CryptoSuite;

/// Maximum DER-encoded signature length for a 256-bit curve: two INTEGERs
/// of up to 33 bytes each plus framing.
pub const MAX_DER_SIGNATURE_LEN: usize = 72;

/// `SignatureScheme` for the ECDSA-P256 / SHA-256 suite.
#[derive(Debug, Default, Clone, Copy)]
pub struct EcdsaP256Sha256;

impl EcdsaP256Sha256 {
    fn signing_key(signing_key: &[u8]) -> Result<SigningKey, CryptoError> {
        let secret_key = P256SecretKey::from_slice(signing_key)
            .map_err(|e| CryptoError::InvalidKey(format!("P-256 signing key: {e}")))?;
        Ok(SigningKey::from(secret_key))
    }
}

impl SignatureScheme for EcdsaP256Sha256 {
    fn suite(&self) -> CryptoSuite {
        CryptoSuite::EcdsaSha256
    }

    fn max_signature_len(&self) -> usize {
        MAX_DER_SIGNATURE_LEN
    }

    fn generate_key_pair(&self, key_bits: u32) -> Result<GeneratedKeyPair, CryptoError> {
        if key_bits != 256 {
            return Err(CryptoError::InvalidKey(format!(
                "P-256 supports 256-bit keys, requested {key_bits}"
            )));
        }
        let signing_key = SigningKey::random(&mut OsRng);
        let public_key = signing_key.verifying_key().to_sec1_bytes().to_vec();
        Ok(GeneratedKeyPair {
            signing_key: signing_key.to_bytes().to_vec(),
            public_key,
        })
    }

    fn public_key_for(&self, signing_key: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let signing_key = Self::signing_key(signing_key)?;
        Ok(signing_key.verifying_key().to_sec1_bytes().to_vec())
    }

    fn validate_public_key(&self, public_key: &[u8]) -> Result<(), CryptoError> {
        VerifyingKey::from_sec1_bytes(public_key)
            .map(|_| ())
            .map_err(|e| CryptoError::InvalidKey(format!("P-256 public key: {e}")))
    }

    fn sign_digest(&self, signing_key: &[u8], digest: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let signing_key = Self::signing_key(signing_key)?;
        let signature: P256Signature = signing_key
            .sign_prehash(digest)
            .map_err(|e| CryptoError::SigningFailure(format!("P-256 sign_prehash: {e}")))?;
        Ok(signature.to_der().as_bytes().to_vec())
    }

    fn verify_digest(&self, public_key: &[u8], digest: &[u8], signature: &[u8]) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_sec1_bytes(public_key) else {
            tracing::debug!("ECDSA verify rejected: unparsable public key");
            return false;
        };
        let Ok(signature) = P256Signature::from_der(signature) else {
            tracing::debug!("ECDSA verify rejected: unparsable DER signature");
            return false;
        };
        verifying_key.verify_prehash(digest, &signature).is_ok()
    }
}
