// ABOUTME: Domain models shared between the server and its store adapter
// ABOUTME: Re-exports roles, identities, employees, and training sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Clubhouse Contributors

//! Data models for the Clubhouse administration API

/// Employee records
pub mod employee;
/// Identities (login accounts) and their public views
pub mod identity;
/// Fixed role set
pub mod role;
/// Training sessions
pub mod training;

pub use employee::{Employee, EmployeeUpdate, NewEmployee};
pub use identity::{Identity, IdentitySummary};
pub use role::Role;
pub use training::{NewTraining, Training, TrainingUpdate};
