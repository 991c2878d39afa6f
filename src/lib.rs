// ABOUTME: Main library entry point for the Clubhouse administration API
// ABOUTME: Authentication core, role-based access guard, and club resource routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Clubhouse Contributors

#![deny(unsafe_code)]

//! # Clubhouse Server
//!
//! Role-based administration backend for a sports club. Identities sign up and
//! log in with email and password, receive an HS256 bearer token, and call
//! routes whose access is decided per request from the identity's current role.
//!
//! ## Architecture
//!
//! - **crypto**: Argon2id password hashing with legacy SHA-256 verification
//! - **auth**: token issuance and verification
//! - **middleware**: the access guard, request ids, and CORS
//! - **database**: `SQLite` storage for identities, employees, and trainings
//! - **routes**: login/register/profile plus admin CRUD surfaces
//! - **server**: router assembly and the HTTP lifecycle
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use clubhouse_server::config::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Clubhouse configured on port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// `JWT` issuance and verification
pub mod auth;

/// Environment-driven server configuration
pub mod config;

/// Application constants
pub mod constants;

/// Password hashing
pub mod crypto;

/// Database storage and the credential store contract
pub mod database;

/// Unified error handling
pub mod errors;

/// Structured logging setup
pub mod logging;

/// `HTTP` middleware: access guard, request ids, `CORS`
pub mod middleware;

/// Domain models
pub mod models;

/// Shared server resources
pub mod resources;

/// `HTTP` route handlers
pub mod routes;

/// Router assembly and server lifecycle
pub mod server;
