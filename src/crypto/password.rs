// ABOUTME: Password hashing with Argon2id and verification of legacy SHA-256 digests
// ABOUTME: Verifies both formats and flags legacy digests for transparent upgrade on login
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Clubhouse Contributors

//! # Password Hasher
//!
//! New digests are Argon2id PHC strings with a per-identity random salt.
//! Accounts imported from the previous system carry unsalted SHA-256 hex
//! digests; these still verify (in constant time) and report
//! [`PasswordHasher::needs_rehash`] so login can replace them.

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier as _,
    },
    Argon2,
};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::errors::{AppError, AppResult};

pub use argon2::password_hash::SaltString;

/// Length of a hex-encoded SHA-256 digest
const LEGACY_DIGEST_LEN: usize = 64;

/// One-way transform of plaintext secrets into stored digests
#[derive(Clone, Default)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create a hasher with the library's default Argon2id parameters
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash a plaintext with a fresh random salt
    ///
    /// # Errors
    ///
    /// Returns an internal error if the Argon2 backend rejects the input
    pub fn hash(&self, plaintext: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.hash_with_salt(plaintext, &salt)
    }

    /// Hash a plaintext with a caller-supplied salt
    ///
    /// Deterministic: equal inputs always produce equal digests.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the Argon2 backend rejects the input
    pub fn hash_with_salt(&self, plaintext: &str, salt: &SaltString) -> AppResult<String> {
        self.argon2
            .hash_password(plaintext.as_bytes(), salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
    }

    /// Check a plaintext against a stored digest of either format
    #[must_use]
    pub fn verify(&self, plaintext: &str, stored: &str) -> bool {
        if is_legacy_digest(stored) {
            return verify_legacy(plaintext, stored);
        }

        PasswordHash::new(stored).is_ok_and(|parsed| {
            self.argon2
                .verify_password(plaintext.as_bytes(), &parsed)
                .is_ok()
        })
    }

    /// Whether a stored digest should be replaced with a fresh Argon2id hash
    #[must_use]
    pub fn needs_rehash(stored: &str) -> bool {
        is_legacy_digest(stored)
    }

    /// Spend roughly one hash worth of work on a plaintext and discard it
    ///
    /// Used on login for unknown emails so both failure paths cost the same.
    pub fn equalize_timing(&self, plaintext: &str) {
        if let Err(e) = self.hash(plaintext) {
            tracing::debug!("Timing equalization hash failed: {}", e);
        }
    }

    /// [`Self::hash`] on the blocking pool
    ///
    /// # Errors
    ///
    /// Returns an internal error if hashing fails or the task panics
    pub async fn hash_blocking(&self, plaintext: String) -> AppResult<String> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
    }

    /// [`Self::verify`] on the blocking pool
    ///
    /// # Errors
    ///
    /// Returns an internal error if the task panics
    pub async fn verify_blocking(&self, plaintext: String, stored: String) -> AppResult<bool> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &stored))
            .await
            .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))
    }

    /// [`Self::equalize_timing`] on the blocking pool
    pub async fn equalize_timing_blocking(&self, plaintext: String) {
        let hasher = self.clone();
        if let Err(e) =
            tokio::task::spawn_blocking(move || hasher.equalize_timing(&plaintext)).await
        {
            tracing::debug!("Timing equalization task failed: {}", e);
        }
    }
}

fn is_legacy_digest(stored: &str) -> bool {
    stored.len() == LEGACY_DIGEST_LEN && stored.bytes().all(|b| b.is_ascii_hexdigit())
}

fn verify_legacy(plaintext: &str, stored: &str) -> bool {
    let computed = hex::encode(Sha256::digest(plaintext.as_bytes()));
    computed
        .as_bytes()
        .ct_eq(stored.to_ascii_lowercase().as_bytes())
        .into()
}
