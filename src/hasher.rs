//!
//! Stateful digest accumulator.
//!
//! A `CryptoHasher` folds bytes into a running digest and yields a
//! `CryptoHash` on finalization. `init` must be called before the first
//! `update_bytes` and may be called again at any point to restart; updating
//! or finalizing outside the accumulating state is `CryptoError::InvalidState`.
//! One instance serves one sequential caller.

use sha2::{Digest, Sha256, Sha512};

use crate::error::CryptoError;
use crate::primitives::CryptoHash;
use crate::types::DigestAlgorithm;

/// One-shot digest of `data` under `algorithm`.
pub fn digest_bytes(algorithm: DigestAlgorithm, data: &[u8]) -> Vec<u8> {
    match algorithm {
        DigestAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
        DigestAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
    }
}

enum State {
    /// Constructed, `init` not yet called.
    Idle,
    Accumulating(Inner),
    Finalized,
}

enum Inner {
    Sha256(Sha256),
    Sha512(Sha512),
}

impl Inner {
    fn fresh(algorithm: DigestAlgorithm) -> Self {
        match algorithm {
            DigestAlgorithm::Sha256 => Inner::Sha256(Sha256::new()),
            DigestAlgorithm::Sha512 => Inner::Sha512(Sha512::new()),
        }
    }
}

/// Stateful digest accumulator producing `CryptoHash` values.
pub struct CryptoHasher {
    algorithm: DigestAlgorithm,
    state: State,
}

impl CryptoHasher {
    pub fn new(algorithm: DigestAlgorithm) -> Self {
        CryptoHasher {
            algorithm,
            state: State::Idle,
        }
    }

    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// Resets the accumulator. Required before first use; may be called
    /// again at any time to restart a session.
    pub fn init(&mut self) {
        self.state = State::Accumulating(Inner::fresh(self.algorithm));
    }

    /// Folds `data` into the running digest. Order-sensitive.
    pub fn update_bytes(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        match &mut self.state {
            State::Accumulating(Inner::Sha256(h)) => h.update(data),
            State::Accumulating(Inner::Sha512(h)) => h.update(data),
            State::Idle => return Err(CryptoError::InvalidState("update_bytes before init")),
            State::Finalized => {
                return Err(CryptoError::InvalidState("update_bytes after finalize"))
            }
        }
        Ok(())
    }

    /// Closes the accumulator and returns the digest. A new `init` is
    /// required before the hasher can be used again.
    pub fn finalize(&mut self) -> Result<CryptoHash, CryptoError> {
        let state = std::mem::replace(&mut self.state, State::Finalized);
        let digest = match state {
            State::Accumulating(Inner::Sha256(h)) => h.finalize().to_vec(),
            State::Accumulating(Inner::Sha512(h)) => h.finalize().to_vec(),
            State::Idle => {
                self.state = State::Idle;
                return Err(CryptoError::InvalidState("finalize before init"));
            }
            State::Finalized => return Err(CryptoError::InvalidState("finalize after finalize")),
        };
        Ok(CryptoHash::new(self.algorithm, digest))
    }
}
