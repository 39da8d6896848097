//!
//! Ed25519 signatures over finalized SHA-512 digests.
//!
//! Ed25519 signs arbitrary messages; in this subsystem the message handed
//! to the primitive is the finalized digest, matching the pipeline shape of
//! the other suites. Signatures are a fixed 64 bytes.

use ed25519_dalek::{
    Signature as Ed25519Signature, Signer as DalekSigner, SigningKey, Verifier as DalekVerifier,
    VerifyingKey, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH, SIGNATURE_LENGTH,
};
use rand_core::OsRng;

use super::{GeneratedKeyPair, SignatureScheme};
use crate::error::CryptoError;
use crate::types::CryptoSuite;

/// `SignatureScheme` for the Ed25519 suite.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ed25519Scheme;

impl Ed25519Scheme {
    fn signing_key(signing_key: &[u8]) -> Result<SigningKey, CryptoError> {
        let bytes: &[u8; SECRET_KEY_LENGTH] = signing_key
            .try_into()
            .map_err(|_| CryptoError::InvalidKey("Ed25519 signing key length".to_string()))?;
        Ok(SigningKey::from_bytes(bytes))
    }
}

impl SignatureScheme for Ed25519Scheme {
    fn suite(&self) -> CryptoSuite {
        CryptoSuite::Ed25519
    }

    fn max_signature_len(&self) -> usize {
        SIGNATURE_LENGTH
    }

    fn generate_key_pair(&self, key_bits: u32) -> Result<GeneratedKeyPair, CryptoError> {
        if key_bits != 256 {
            return Err(CryptoError::InvalidKey(format!(
                "Ed25519 supports 256-bit keys, requested {key_bits}"
            )));
        }
        let signing_key = SigningKey::generate(&mut OsRng);
        Ok(GeneratedKeyPair {
            public_key: signing_key.verifying_key().to_bytes().to_vec(),
            signing_key: signing_key.to_bytes().to_vec(),
        })
    }

    fn public_key_for(&self, signing_key: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let signing_key = Self::signing_key(signing_key)?;
        Ok(signing_key.verifying_key().to_bytes().to_vec())
    }

    fn validate_public_key(&self, public_key: &[u8]) -> Result<(), CryptoError> {
        let bytes: &[u8; PUBLIC_KEY_LENGTH] = public_key
            .try_into()
            .map_err(|_| CryptoError::InvalidKey("Ed25519 public key length".to_string()))?;
        VerifyingKey::from_bytes(bytes)
            .map(|_| ())
            .map_err(|e| CryptoError::InvalidKey(format!("Ed25519 public key: {e}")))
    }

    fn sign_digest(&self, signing_key: &[u8], digest: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let signing_key = Self::signing_key(signing_key)?;
        let signature: Ed25519Signature = signing_key.sign(digest);
        Ok(signature.to_bytes().to_vec())
    }

    fn verify_digest(&self, public_key: &[u8], digest: &[u8], signature: &[u8]) -> bool {
        let Ok(key_bytes) = <&[u8; PUBLIC_KEY_LENGTH]>::try_from(public_key) else {
            tracing::debug!("Ed25519 verify rejected: public key length");
            return false;
        };
        let Ok(verifying_key) = VerifyingKey::from_bytes(key_bytes) else {
            tracing::debug!("Ed25519 verify rejected: unparsable public key");
            return false;
        };
        let Ok(sig_bytes) = <&[u8; SIGNATURE_LENGTH]>::try_from(signature) else {
            tracing::debug!("Ed25519 verify rejected: signature length");
            return false;
        };
        let signature = Ed25519Signature::from_bytes(sig_bytes);
        verifying_key.verify(digest, &signature).is_ok()
    }
}
