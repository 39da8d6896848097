#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(deprecated)]

//!
//! Signet-Core is a pluggable digital-signature subsystem.
//!
//! Callers sign and verify byte digests through interchangeable
//! cryptographic back-ends while key-material storage and container
//! formats stay hidden behind the `KeyStore` interface. The pipeline is:
//! open or create a key container, wrap the resulting `KeyStore` into a
//! `Signer` bound to a `CryptoSuite`, hash a payload with the signer's
//! `CryptoHasher`, sign the finalized digest, and verify the
//! digest/signature pair through a `Verifier` holding the registered
//! public `Key`.

// Algorithm and suite tags.
pub mod types;

// Immutable value objects (CryptoHash, Signature, Key, KeyId).
pub mod primitives;

// Re-export the value objects at the crate root.
pub use primitives::*;

// Stateful digest accumulation.
pub mod hasher;

// Suite back-ends wrapping the primitive libraries.
pub mod crypto;

// Suite registry passed to constructors in place of global init/fini.
pub mod context;

// Key-material storage and the container backend seam.
pub mod keystore;

// Digest signing bound to a key store and suite.
pub mod signer;

// Key registry and digest/signature verification.
pub mod verifier;

// Error taxonomy.
pub mod error;

pub use context::SecurityContext;
pub use hasher::CryptoHasher;
pub use keystore::{ContainerBackend, FileContainer, KeyStore};
pub use signer::Signer;
pub use types::{CryptoSuite, DigestAlgorithm, SigningAlgorithm};
pub use verifier::Verifier;
