// ABOUTME: Configuration management module for server settings
// ABOUTME: Loads typed configuration from the environment once at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Clubhouse Contributors

//! Configuration module for the Clubhouse server
//!
//! Configuration is read from environment variables exactly once and is
//! immutable afterwards. The binary layers command-line overrides on top.

/// Environment and server configuration
pub mod environment;

pub use environment::{
    AuthConfig, CorsConfig, DatabaseConfig, DatabaseUrl, Environment, JwtSecret, ServerConfig,
};
