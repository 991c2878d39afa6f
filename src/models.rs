// ABOUTME: Re-exports the domain models from clubhouse-core
// ABOUTME: Role, Identity, Employee, and Training with their request shapes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Clubhouse Contributors

//! # Data Models
//!
//! Models are defined in `clubhouse-core` so they can be shared without pulling
//! in the HTTP and database stack.

pub use clubhouse_core::models::*;
