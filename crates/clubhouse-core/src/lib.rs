// ABOUTME: Core types and constants for the Clubhouse administration API
// ABOUTME: Foundation crate with error handling, role/identity models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Clubhouse Contributors

#![deny(unsafe_code)]

//! # Clubhouse Core
//!
//! Foundation crate providing shared types for the Clubhouse server. It changes
//! rarely, so the server crate gets incremental compilation benefits.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode`, and the store-level `DatabaseError`
//! - **models**: `Role`, `Identity`, `Employee`, `Training`
//! - **constants**: service names, token defaults, validation limits

/// Unified error handling with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (identities, roles, employees, trainings)
pub mod models;
