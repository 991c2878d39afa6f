// ABOUTME: Cryptography module for password digests
// ABOUTME: Centralizes hashing so credential checks never touch plaintext storage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Clubhouse Contributors

//! Cryptographic utilities for the Clubhouse server

pub mod password;

pub use password::{PasswordHasher, SaltString};
