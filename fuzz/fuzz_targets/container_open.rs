#![no_main]

// Harness: container_open
// Arbitrary bytes fed through the sealed-container parser must never
// panic; every outcome is a KeyStore or a KeyStoreError.

use libfuzzer_sys::fuzz_target;
use signet_core::{DigestAlgorithm, FileContainer};

fuzz_target!(|data: &[u8]| {
    let backend = FileContainer::default();
    let _ = backend.open_bytes(data, "blueberry", DigestAlgorithm::Sha256);
    let _ = backend.open_bytes(data, "", DigestAlgorithm::Sha512);
});
