// ABOUTME: Re-exports system-wide constants from clubhouse-core
// ABOUTME: Service names, token defaults, validation limits, and error messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Clubhouse Contributors

pub use clubhouse_core::constants::*;
