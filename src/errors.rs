// ABOUTME: Re-exports the unified error types from clubhouse-core
// ABOUTME: Keeps `crate::errors::*` paths stable across the server crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Clubhouse Contributors

//! Error types live in `clubhouse-core`; this module re-exports them.

pub use clubhouse_core::errors::*;
