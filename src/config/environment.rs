// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, deployment modes, and signing secret loading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Clubhouse Contributors

//! Environment-based configuration management

use anyhow::{bail, Context, Result};
use std::env;
use std::fmt;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::auth::generate_jwt_secret;
use crate::constants::{ports, tokens};

/// Default request timeout for the HTTP server
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default SQLite location
const DEFAULT_DATABASE_URL: &str = "sqlite:./data/clubhouse.db";

/// Environment type for security and other configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// # Errors
    ///
    /// Returns an error for non-SQLite connection strings
    pub fn parse_url(s: &str) -> Result<Self> {
        if let Some(path_str) = s.strip_prefix("sqlite:") {
            let path_str = path_str.strip_prefix("//").unwrap_or(path_str);
            if path_str == ":memory:" {
                Ok(Self::Memory)
            } else if path_str.is_empty() {
                bail!("DATABASE_URL has an empty SQLite path")
            } else {
                Ok(Self::SQLite {
                    path: PathBuf::from(path_str),
                })
            }
        } else if s.contains("://") {
            bail!("Unsupported database URL scheme: only SQLite is available")
        } else {
            // Bare path: treat as SQLite file
            Ok(Self::SQLite {
                path: PathBuf::from(s),
            })
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./data/clubhouse.db"),
        }
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Token signing secret; never printed
#[derive(Clone)]
pub struct JwtSecret {
    bytes: Vec<u8>,
    generated: bool,
}

impl JwtSecret {
    /// Wrap a configured secret
    ///
    /// # Errors
    ///
    /// Returns an error if the secret is shorter than the minimum length
    pub fn from_configured(secret: &str) -> Result<Self> {
        if secret.len() < tokens::MIN_SECRET_BYTES {
            bail!(
                "JWT_SECRET must be at least {} bytes long",
                tokens::MIN_SECRET_BYTES
            );
        }
        Ok(Self {
            bytes: secret.as_bytes().to_vec(),
            generated: false,
        })
    }

    /// Generate a random per-process secret
    #[must_use]
    pub fn generate() -> Self {
        Self {
            bytes: generate_jwt_secret().to_vec(),
            generated: true,
        }
    }

    /// Raw secret bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Whether this secret was generated rather than configured
    #[must_use]
    pub const fn is_generated(&self) -> bool {
        self.generated
    }
}

impl fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtSecret")
            .field("bytes", &"[REDACTED]")
            .field("generated", &self.generated)
            .finish()
    }
}

/// Top-level server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Bind address
    pub host: String,
    /// Deployment environment
    pub environment: Environment,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: DatabaseUrl,
    /// Pool size for file-backed databases
    pub max_connections: u32,
}

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Token signing secret
    pub jwt_secret: JwtSecret,
    /// JWT expiry time in hours
    pub jwt_expiry_hours: i64,
}

/// CORS configuration
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Comma-separated allowed origins, or `*`
    pub allowed_origins: String,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A numeric variable does not parse
    /// - `DATABASE_URL` names an unsupported backend
    /// - `JWT_SECRET` is missing in production or too short
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let environment =
            Environment::from_str_or_default(&env_var_or("ENVIRONMENT", "development"));

        let http_port = env::var("HTTP_PORT")
            .or_else(|_| env::var("PORT"))
            .map_or(Ok(ports::DEFAULT_HTTP_PORT), |value| value.parse())
            .context("Invalid HTTP_PORT value")?;

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => JwtSecret::from_configured(&secret)?,
            Err(_) if environment.is_production() => {
                bail!("JWT_SECRET must be set in production")
            }
            Err(_) => {
                warn!("JWT_SECRET not set; using a random secret, tokens will not survive a restart");
                JwtSecret::generate()
            }
        };

        let config = Self {
            http_port,
            host: env_var_or("HOST", "0.0.0.0"),
            environment,
            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(&env_var_or("DATABASE_URL", DEFAULT_DATABASE_URL))?,
                max_connections: env_var_or("DATABASE_MAX_CONNECTIONS", "5")
                    .parse()
                    .context("Invalid DATABASE_MAX_CONNECTIONS value")?,
            },
            auth: AuthConfig {
                jwt_secret,
                jwt_expiry_hours: env_var_or(
                    "JWT_EXPIRY_HOURS",
                    &tokens::DEFAULT_EXPIRY_HOURS.to_string(),
                )
                .parse()
                .context("Invalid JWT_EXPIRY_HOURS value")?,
            },
            cors: CorsConfig {
                allowed_origins: env_var_or("CORS_ALLOWED_ORIGINS", "*"),
            },
            request_timeout_secs: env_var_or(
                "REQUEST_TIMEOUT_SECS",
                &DEFAULT_REQUEST_TIMEOUT_SECS.to_string(),
            )
            .parse()
            .context("Invalid REQUEST_TIMEOUT_SECS value")?,
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error for a token lifetime outside `1..=MAX_EXPIRY_HOURS`, a
    /// zero timeout, or an empty connection pool
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_expiry_hours <= 0 {
            bail!("JWT_EXPIRY_HOURS must be positive");
        }
        if self.auth.jwt_expiry_hours > tokens::MAX_EXPIRY_HOURS {
            bail!(
                "JWT_EXPIRY_HOURS must not exceed {}",
                tokens::MAX_EXPIRY_HOURS
            );
        }
        if self.request_timeout_secs == 0 {
            bail!("REQUEST_TIMEOUT_SECS must be positive");
        }
        if self.database.max_connections == 0 {
            bail!("DATABASE_MAX_CONNECTIONS must be positive");
        }
        if self.environment.is_production() && self.cors.allowed_origins.trim() == "*" {
            warn!("CORS allows any origin in production");
        }
        Ok(())
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Clubhouse Server Configuration:\n\
             - Environment: {}\n\
             - Listen: {}:{}\n\
             - Database: {}\n\
             - Token lifetime: {}h\n\
             - Signing secret: {}\n\
             - CORS origins: {}\n\
             - Request timeout: {}s",
            self.environment,
            self.host,
            self.http_port,
            self.database.url,
            self.auth.jwt_expiry_hours,
            if self.auth.jwt_secret.is_generated() {
                "generated"
            } else {
                "configured"
            },
            self.cors.allowed_origins,
            self.request_timeout_secs,
        )
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_short_secret_rejected() {
        assert!(JwtSecret::from_configured("short").is_err());
        assert!(JwtSecret::from_configured(&"k".repeat(tokens::MIN_SECRET_BYTES)).is_ok());
    }

    #[test]
    fn test_secret_debug_is_redacted() {
        let secret = JwtSecret::from_configured(&"s".repeat(40)).unwrap();
        let printed = format!("{secret:?}");
        assert!(printed.contains("REDACTED"));
        assert!(!printed.contains("ssss"));
    }
}
