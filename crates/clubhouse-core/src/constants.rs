// ABOUTME: Application-wide constants organized by domain
// ABOUTME: Service names, token lifetimes, pagination and validation limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Clubhouse Contributors

/// Service identifiers used in logs and token audiences
pub mod service_names {
    /// Server name used in structured logs
    pub const CLUBHOUSE_SERVER: &str = "clubhouse-server";
    /// Audience claim for access tokens
    pub const CLUBHOUSE_API: &str = "clubhouse-api";
}

/// Token lifetimes
pub mod tokens {
    /// Default access token lifetime
    pub const DEFAULT_EXPIRY_HOURS: i64 = 24;
    /// Longest accepted access token lifetime (one year)
    pub const MAX_EXPIRY_HOURS: i64 = 24 * 365;
    /// Minimum accepted length of a configured signing secret, in bytes
    pub const MIN_SECRET_BYTES: usize = 32;
    /// Length of a generated development secret, in bytes
    pub const GENERATED_SECRET_BYTES: usize = 64;
}

/// Input limits
pub mod limits {
    /// Maximum email length accepted by registration
    pub const MAX_EMAIL_LENGTH: usize = 254;
    /// Default page size for list endpoints
    pub const DEFAULT_PAGE_SIZE: i64 = 100;
    /// Largest page a client may request
    pub const MAX_PAGE_SIZE: i64 = 500;
}

/// Network defaults
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 3000;
}

/// Client-facing error messages
pub mod error_messages {
    /// Returned for every failed login, whatever the cause
    pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
    /// Returned when a guarded route is called without a bearer token
    pub const MISSING_CREDENTIALS: &str = "No token provided";
    /// Returned for any token that fails verification
    pub const INVALID_TOKEN: &str = "Invalid or expired token";
    /// Returned when the caller's role is not allowed
    pub const ACCESS_DENIED: &str = "Access denied";
    /// Returned when registration hits an existing email
    pub const EMAIL_IN_USE: &str = "Email is already in use";
    /// Returned for malformed emails
    pub const INVALID_EMAIL_FORMAT: &str = "Email address is not valid";
    /// Returned for empty passwords
    pub const EMPTY_PASSWORD: &str = "Password must not be empty";
}
