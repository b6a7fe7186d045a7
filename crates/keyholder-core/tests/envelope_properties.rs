use std::sync::Arc;
use std::thread;

use keyholder_core::crypto::{
    derive_key, open, seal, FormatVersion, SealedBlob, NONCE_LEN, SALT_LEN, TAG_LEN,
};
use keyholder_core::KeyholderError;
use proptest::prelude::*;
use secrecy::ExposeSecret;

const HEADER: usize = 1 + SALT_LEN;

fn config() -> ProptestConfig {
    // Each case runs two full 200k-iteration derivations.
    ProptestConfig {
        cases: 6,
        ..ProptestConfig::default()
    }
}

proptest! {
    #![proptest_config(config())]

    #[test]
    fn prop_round_trip(secret in "\\PC{1,256}", passphrase in "\\PC{1,128}") {
        let blob = seal(&secret, &passphrase).expect("seal should succeed");
        let opened = open(&blob, &passphrase).expect("open should succeed");
        prop_assert_eq!(opened.expose_secret(), secret.as_str());
    }

    #[test]
    fn prop_wrong_passphrase_fails(
        secret in "[a-z]{1,64}",
        passphrase in "[a-z]{1,32}",
        suffix in "[0-9]{1,4}",
    ) {
        let blob = seal(&secret, &passphrase).expect("seal should succeed");
        let wrong = format!("{}{}", passphrase, suffix);
        let err = open(&blob, &wrong).expect_err("wrong passphrase must fail");
        prop_assert!(err.is_authentication());
    }
}

#[test]
fn test_reference_example() {
    let blob = seal("super-secret", "pwd123").expect("seal should succeed");
    assert!(blob.len() >= 33);

    let opened = open(&blob, "pwd123").expect("open should succeed");
    assert_eq!(opened.expose_secret(), "super-secret");

    let err = open(&blob, "wrong").expect_err("wrong passphrase must fail");
    assert!(matches!(err, KeyholderError::Authentication));
}

#[test]
fn test_boundary_lengths_round_trip() {
    let longest_secret = "\u{1F511}".repeat(4096);
    let longest_passphrase = "p".repeat(128);

    for (secret, passphrase) in [
        ("x", "y"),
        (longest_secret.as_str(), longest_passphrase.as_str()),
        ("grüße, 世界", "пароль"),
    ] {
        let blob = seal(secret, passphrase).expect("seal should succeed");
        let opened = open(&blob, passphrase).expect("open should succeed");
        assert_eq!(opened.expose_secret(), secret);
    }
}

#[test]
fn test_sealing_twice_differs() {
    let first = seal("same", "pass").expect("seal should succeed");
    let second = seal("same", "pass").expect("seal should succeed");

    assert_ne!(first, second);
    assert_ne!(first[1..HEADER], second[1..HEADER], "salts must differ");
    assert_eq!(open(&second, "pass").unwrap().expose_secret(), "same");
}

#[test]
fn test_single_bit_flip_anywhere_after_version_fails() {
    let blob = seal("tamper-me", "pass").expect("seal should succeed");
    assert_eq!(blob.len(), HEADER + NONCE_LEN + "tamper-me".len() + TAG_LEN);

    // One flipped bit per byte across salt, nonce, ciphertext and tag.
    for index in 1..blob.len() {
        let bit = index % 8;
        let mut tampered = blob.clone();
        tampered[index] ^= 1 << bit;
        let err = open(&tampered, "pass").expect_err("tampered blob must fail");
        assert!(
            err.is_authentication(),
            "byte {} bit {} gave {:?}",
            index,
            bit,
            err
        );
    }
}

#[test]
fn test_short_blobs_are_malformed() {
    for len in [0, 1, HEADER - 1] {
        let blob = vec![FormatVersion::V1.tag(); len];
        let err = open(&blob, "pass").expect_err("short blob must fail");
        assert!(matches!(err, KeyholderError::MalformedBlob(_)), "len {}", len);
    }
}

#[test]
fn test_unknown_version_is_malformed() {
    let mut blob = seal("secret", "pass").expect("seal should succeed");
    blob[0] = 0x7f;
    let err = open(&blob, "pass").expect_err("unknown version must fail");
    assert!(matches!(err, KeyholderError::MalformedBlob(_)));
}

#[test]
fn test_embedded_salt_reproduces_key() {
    let blob = seal("secret", "pass").expect("seal should succeed");
    let parsed = SealedBlob::parse(&blob).expect("parse should succeed");

    let first = derive_key("pass", parsed.salt);
    let second = derive_key("pass", parsed.salt);
    assert_eq!(first.as_bytes(), second.as_bytes());
    assert_ne!(first.as_bytes(), derive_key("pass2", parsed.salt).as_bytes());
}

#[test]
fn test_concurrent_seal_and_open() {
    let shared = Arc::new(seal("shared", "pass").expect("seal should succeed"));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                let secret = format!("secret-{}", i);
                let blob = seal(&secret, "pass").expect("seal should succeed");
                let mine = open(&blob, "pass").expect("open should succeed");
                let theirs = open(&shared, "pass").expect("open should succeed");
                (secret, mine.expose_secret().to_string(), theirs.expose_secret().to_string())
            })
        })
        .collect();

    for handle in handles {
        let (expected, mine, theirs) = handle.join().expect("thread should not panic");
        assert_eq!(mine, expected);
        assert_eq!(theirs, "shared");
    }
}
