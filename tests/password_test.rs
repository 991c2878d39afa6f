// ABOUTME: Tests for the Argon2id password hasher and legacy digest support
// ABOUTME: Verifies salting, determinism with a fixed salt, and rehash detection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Clubhouse Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use clubhouse_server::crypto::{PasswordHasher, SaltString};
use sha2::{Digest, Sha256};

#[test]
fn test_fixed_salt_is_deterministic() {
    let hasher = PasswordHasher::new();
    let salt = SaltString::from_b64("c29tZXNhbHRzb21lc2FsdA").unwrap();

    let first = hasher.hash_with_salt("pw1", &salt).unwrap();
    let second = hasher.hash_with_salt("pw1", &salt).unwrap();
    let other = hasher.hash_with_salt("pw2", &salt).unwrap();

    assert_eq!(first, second);
    assert_ne!(first, other);
    assert!(hasher.verify("pw1", &first));
}

#[test]
fn test_argon2_digest_does_not_need_rehash() {
    let hasher = PasswordHasher::new();
    let digest = hasher.hash("pw1").unwrap();
    assert!(!PasswordHasher::needs_rehash(&digest));
}

#[test]
fn test_legacy_digest_flagged_for_rehash() {
    let legacy = hex::encode(Sha256::digest(b"club-secret"));
    let hasher = PasswordHasher::new();

    assert!(hasher.verify("club-secret", &legacy));
    assert!(!hasher.verify("club-secret ", &legacy));
    assert!(PasswordHasher::needs_rehash(&legacy));
}

#[test]
fn test_empty_and_unicode_passwords() {
    let hasher = PasswordHasher::new();

    let empty = hasher.hash("").unwrap();
    assert!(hasher.verify("", &empty));
    assert!(!hasher.verify(" ", &empty));

    let unicode = hasher.hash("пароль-ß-🏉").unwrap();
    assert!(hasher.verify("пароль-ß-🏉", &unicode));
}

#[test]
fn test_garbage_stored_values_never_verify() {
    let hasher = PasswordHasher::new();
    for stored in ["", "plaintext", "$argon2id$broken", "zz".repeat(32).as_str()] {
        assert!(!hasher.verify("plaintext", stored), "verified {stored:?}");
    }
}

#[tokio::test]
async fn test_blocking_wrappers() {
    let hasher = PasswordHasher::new();
    let digest = hasher.hash_blocking("pw1".to_owned()).await.unwrap();

    assert!(hasher
        .verify_blocking("pw1".to_owned(), digest.clone())
        .await
        .unwrap());
    assert!(!hasher
        .verify_blocking("pw2".to_owned(), digest)
        .await
        .unwrap());
}
