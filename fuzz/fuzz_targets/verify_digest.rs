#![no_main]

// Harness: verify_digest
// Arbitrary signature and digest bytes against a registered key must
// verify false (or true for the genuine pair) without panicking.

use std::sync::OnceLock;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use signet_core::{
    CryptoHash, CryptoSuite, DigestAlgorithm, Key, SecurityContext, Signature, SigningAlgorithm,
    Verifier,
};

#[derive(Arbitrary, Debug)]
struct VerifyFrame {
    digest: Vec<u8>,
    signature: Vec<u8>,
    suite_choice: u8,
}

fn suite_from_byte(b: u8) -> CryptoSuite {
    match b % 2 {
        0 => CryptoSuite::EcdsaSha256,
        _ => CryptoSuite::Ed25519,
    }
}

fn verifier() -> &'static (Verifier, Key) {
    static FIXTURE: OnceLock<(Verifier, Key)> = OnceLock::new();
    FIXTURE.get_or_init(|| {
        let context = SecurityContext::new();
        let scheme = context.scheme(CryptoSuite::EcdsaSha256).unwrap();
        let pair = scheme.generate_key_pair(256).unwrap();
        let key = Key::new(
            SigningAlgorithm::Ecdsa,
            pair.public_key,
            DigestAlgorithm::Sha256,
        );
        let mut verifier = Verifier::new(&context);
        verifier.add_key(key.clone());
        (verifier, key)
    })
}

fuzz_target!(|frame: VerifyFrame| {
    let (verifier, key) = verifier();
    let suite = suite_from_byte(frame.suite_choice);
    let hash = CryptoHash::new(suite.digest_algorithm(), frame.digest);
    let signature = Signature::new(suite, frame.signature);
    let _ = verifier.verify_digest(key.id(), &hash, suite, &signature);
});
