//!
//! Algorithm tags shared across the crate.
//!
//! A `CryptoSuite` names a signing algorithm paired with a digest algorithm.
//! The suite tag travels with every `Signature` and is the selector for the
//! back-end `SignatureScheme` registered in a `SecurityContext`.

/// Signing algorithm tag carried by keys and key stores.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SigningAlgorithm {
    /// ECDSA over the NIST P-256 curve.
    Ecdsa = 0,
    /// Ed25519 (RFC 8032).
    Ed25519 = 1,
}

impl TryFrom<u8> for SigningAlgorithm {
    type Error = crate::error::CryptoError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(SigningAlgorithm::Ecdsa),
            1 => Ok(SigningAlgorithm::Ed25519),
            other => Err(crate::error::CryptoError::UnsupportedAlgorithm(other)),
        }
    }
}

/// Digest algorithm tag carried by every `CryptoHash`.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum DigestAlgorithm {
    Sha256 = 0,
    Sha512 = 1,
}

impl DigestAlgorithm {
    /// Digest output length in bytes.
    pub fn digest_len(&self) -> usize {
        match self {
            DigestAlgorithm::Sha256 => 32,
            DigestAlgorithm::Sha512 => 64,
        }
    }
}

impl TryFrom<u8> for DigestAlgorithm {
    type Error = crate::error::CryptoError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(DigestAlgorithm::Sha256),
            1 => Ok(DigestAlgorithm::Sha512),
            other => Err(crate::error::CryptoError::UnsupportedAlgorithm(other)),
        }
    }
}

/// A named pairing of a signing algorithm and a digest algorithm.
///
/// The suite is fixed at `Signer` construction time and immutable
/// thereafter. Verification states the suite explicitly, so a signature
/// produced under one suite never verifies under another.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum CryptoSuite {
    /// ECDSA-P256 signatures over SHA-256 digests.
    EcdsaSha256 = 0,
    /// Ed25519 signatures over SHA-512 digests.
    Ed25519 = 1,
}

impl CryptoSuite {
    pub fn signing_algorithm(&self) -> SigningAlgorithm {
        match self {
            CryptoSuite::EcdsaSha256 => SigningAlgorithm::Ecdsa,
            CryptoSuite::Ed25519 => SigningAlgorithm::Ed25519,
        }
    }

    pub fn digest_algorithm(&self) -> DigestAlgorithm {
        match self {
            CryptoSuite::EcdsaSha256 => DigestAlgorithm::Sha256,
            CryptoSuite::Ed25519 => DigestAlgorithm::Sha512,
        }
    }
}

impl TryFrom<u8> for CryptoSuite {
    type Error = crate::error::CryptoError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CryptoSuite::EcdsaSha256),
            1 => Ok(CryptoSuite::Ed25519),
            other => Err(crate::error::CryptoError::UnsupportedSuite(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suite_tag_roundtrip() {
        for suite in [CryptoSuite::EcdsaSha256, CryptoSuite::Ed25519] {
            let tag = suite as u8;
            assert_eq!(CryptoSuite::try_from(tag).unwrap(), suite);
        }
        assert!(CryptoSuite::try_from(200).is_err());
    }

    #[test]
    fn suite_components() {
        assert_eq!(
            CryptoSuite::EcdsaSha256.signing_algorithm(),
            SigningAlgorithm::Ecdsa
        );
        assert_eq!(
            CryptoSuite::EcdsaSha256.digest_algorithm(),
            DigestAlgorithm::Sha256
        );
        assert_eq!(
            CryptoSuite::Ed25519.digest_algorithm(),
            DigestAlgorithm::Sha512
        );
    }

    #[test]
    fn digest_lengths() {
        assert_eq!(DigestAlgorithm::Sha256.digest_len(), 32);
        assert_eq!(DigestAlgorithm::Sha512.digest_len(), 64);
    }
}
