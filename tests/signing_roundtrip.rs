//! End-to-end exercise of the container -> signer -> verifier pipeline.

use std::sync::Arc;

use signet_core::keystore::ContainerBackend;
use signet_core::{
    CryptoSuite, DigestAlgorithm, FileContainer, SecurityContext, Signer, SigningAlgorithm,
    Verifier,
};

const PAYLOAD: &[u8] = b"it was a dark and stormy night, and all through the house not a digest was creeping";

fn signer_from_new_container(
    context: &SecurityContext,
    dir: &tempfile::TempDir,
    name: &str,
    algorithm: SigningAlgorithm,
    suite: CryptoSuite,
) -> Signer {
    let backend = FileContainer::new(context.clone());
    let path = dir.path().join(name).to_string_lossy().into_owned();
    backend
        .create(&path, "blueberry", "alice", algorithm, 256, 365)
        .expect("provision container");
    let store = backend
        .open(&path, "blueberry", DigestAlgorithm::Sha256)
        .expect("open container");
    Signer::create(context, Arc::new(store), suite).expect("bind signer")
}

fn sign_payload(signer: &Signer, payload: &[u8]) -> (signet_core::CryptoHash, signet_core::Signature) {
    let mut hasher = signer.crypto_hasher();
    hasher.init();
    hasher.update_bytes(payload).unwrap();
    let hash = hasher.finalize().unwrap();
    let signature = signer.sign_digest(&hash).unwrap();
    (hash, signature)
}

#[test]
fn ecdsa_end_to_end_roundtrip() {
    let context = SecurityContext::new();
    let dir = tempfile::tempdir().unwrap();
    let signer = signer_from_new_container(
        &context,
        &dir,
        "pubkeystore.sgnt",
        SigningAlgorithm::Ecdsa,
        CryptoSuite::EcdsaSha256,
    );

    let (hash, signature) = sign_payload(&signer, PAYLOAD);
    assert!(signature.bytes().len() <= signer.signature_size());
    assert_eq!(signer.signature_size(), 72);

    let mut verifier = Verifier::new(&context);
    verifier.add_key(signer.public_key());

    assert!(verifier.verify_digest(&signer.key_id(), &hash, CryptoSuite::EcdsaSha256, &signature));
}

#[test]
fn substituting_any_tuple_field_fails_verification() {
    let context = SecurityContext::new();
    let dir = tempfile::tempdir().unwrap();
    let signer = signer_from_new_container(
        &context,
        &dir,
        "store_a.sgnt",
        SigningAlgorithm::Ecdsa,
        CryptoSuite::EcdsaSha256,
    );
    let other = signer_from_new_container(
        &context,
        &dir,
        "store_b.sgnt",
        SigningAlgorithm::Ecdsa,
        CryptoSuite::EcdsaSha256,
    );
    assert_ne!(signer, other);

    let (hash, signature) = sign_payload(&signer, PAYLOAD);
    let (other_hash, other_signature) = sign_payload(&other, b"a different payload entirely");

    let mut verifier = Verifier::new(&context);
    verifier.add_key(signer.public_key());
    verifier.add_key(other.public_key());

    // The exact tuple verifies.
    assert!(verifier.verify_digest(&signer.key_id(), &hash, CryptoSuite::EcdsaSha256, &signature));

    // Substituting any one field with the other signer's value fails.
    assert!(!verifier.verify_digest(&other.key_id(), &hash, CryptoSuite::EcdsaSha256, &signature));
    assert!(!verifier.verify_digest(
        &signer.key_id(),
        &other_hash,
        CryptoSuite::EcdsaSha256,
        &signature
    ));
    assert!(!verifier.verify_digest(
        &signer.key_id(),
        &hash,
        CryptoSuite::EcdsaSha256,
        &other_signature
    ));
    assert!(!verifier.verify_digest(&signer.key_id(), &hash, CryptoSuite::Ed25519, &signature));
}

#[test]
fn ed25519_end_to_end_roundtrip() {
    let context = SecurityContext::new();
    let dir = tempfile::tempdir().unwrap();
    let signer = signer_from_new_container(
        &context,
        &dir,
        "ed_store.sgnt",
        SigningAlgorithm::Ed25519,
        CryptoSuite::Ed25519,
    );

    let (hash, signature) = sign_payload(&signer, PAYLOAD);
    assert_eq!(signature.bytes().len(), 64);

    let mut verifier = Verifier::new(&context);
    verifier.add_key(signer.public_key());
    assert!(verifier.verify_digest(&signer.key_id(), &hash, CryptoSuite::Ed25519, &signature));
}

#[test]
fn certificate_metadata_is_exposed_by_the_key_store() {
    let context = SecurityContext::new();
    let dir = tempfile::tempdir().unwrap();
    let signer = signer_from_new_container(
        &context,
        &dir,
        "pubkeystore.sgnt",
        SigningAlgorithm::Ecdsa,
        CryptoSuite::EcdsaSha256,
    );

    let store = signer.key_store();
    assert!(!store.der_encoded_certificate().is_empty());
    assert_eq!(
        store.certificate_digest().algorithm(),
        DigestAlgorithm::Sha256
    );
    assert_eq!(store.certificate_digest().digest().len(), 32);
}

#[test]
fn verification_against_unknown_key_id_returns_false() {
    let context = SecurityContext::new();
    let dir = tempfile::tempdir().unwrap();
    let signer = signer_from_new_container(
        &context,
        &dir,
        "store.sgnt",
        SigningAlgorithm::Ecdsa,
        CryptoSuite::EcdsaSha256,
    );

    let (hash, signature) = sign_payload(&signer, PAYLOAD);

    // Fresh verifier: nothing registered.
    let verifier = Verifier::new(&context);
    assert!(!verifier.verify_digest(&signer.key_id(), &hash, CryptoSuite::EcdsaSha256, &signature));
}

#[test]
fn independent_contexts_coexist() {
    let context_a = SecurityContext::new();
    let context_b = SecurityContext::new();
    let dir = tempfile::tempdir().unwrap();

    let signer = signer_from_new_container(
        &context_a,
        &dir,
        "store.sgnt",
        SigningAlgorithm::Ecdsa,
        CryptoSuite::EcdsaSha256,
    );
    let (hash, signature) = sign_payload(&signer, PAYLOAD);

    // A verifier resolved from a different context still verifies: the
    // built-in suites behave identically across contexts.
    let mut verifier = Verifier::new(&context_b);
    verifier.add_key(signer.public_key());
    assert!(verifier.verify_digest(&signer.key_id(), &hash, CryptoSuite::EcdsaSha256, &signature));
}
