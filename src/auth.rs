// ABOUTME: JWT token issuance and verification for authenticated identities
// ABOUTME: HS256 signing with a process-wide secret loaded once at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Clubhouse Contributors

//! # Token Issuer and Verifier
//!
//! Tokens carry only `{sub, email}` plus registered claims. The caller's role is
//! never embedded: the access guard resolves it from the store on every request.
//! Verification failures are classified for logging ([`JwtValidationError`]) but
//! callers outside this module only ever see a uniform `InvalidCredential`.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{error_messages, service_names, tokens::GENERATED_SECRET_BYTES};
use crate::errors::{AppError, AppResult};

/// `JWT` validation error with detailed information
#[derive(Debug, Clone)]
pub enum JwtValidationError {
    /// Token has expired
    TokenExpired {
        /// When the token expired
        expired_at: DateTime<Utc>,
        /// Current time for reference
        current_time: DateTime<Utc>,
    },
    /// Token signature or audience is invalid
    TokenInvalid {
        /// Reason for invalidity
        reason: String,
    },
    /// Token is malformed (not proper `JWT` format)
    TokenMalformed {
        /// Details about malformation
        details: String,
    },
}

impl JwtValidationError {
    /// Short label for structured logs
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::TokenExpired { .. } => "expired",
            Self::TokenInvalid { .. } => "invalid",
            Self::TokenMalformed { .. } => "malformed",
        }
    }
}

impl std::fmt::Display for JwtValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TokenExpired {
                expired_at,
                current_time,
            } => {
                let ago = current_time.signed_duration_since(*expired_at);
                write!(
                    f,
                    "JWT token expired {} seconds ago at {}",
                    ago.num_seconds(),
                    expired_at.format("%Y-%m-%d %H:%M:%S UTC")
                )
            }
            Self::TokenInvalid { reason } => write!(f, "JWT token is invalid: {reason}"),
            Self::TokenMalformed { details } => write!(f, "JWT token is malformed: {details}"),
        }
    }
}

impl std::error::Error for JwtValidationError {}

impl From<JwtValidationError> for AppError {
    fn from(error: JwtValidationError) -> Self {
        Self::invalid_credential(error_messages::INVALID_TOKEN).with_source(error)
    }
}

/// `JWT` claims for identity assertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Identity `ID`
    pub sub: String,
    /// Identity email
    pub email: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// Audience (who the token is intended for)
    pub aud: String,
    /// Unique token id
    pub jti: String,
}

impl Claims {
    /// Subject parsed as an identity id
    #[must_use]
    pub fn subject_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }
}

/// Issues and verifies HS256 tokens
///
/// Built once from configuration and shared behind an `Arc`; the secret cannot
/// change for the life of the process.
#[derive(Clone)]
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_hours: i64,
}

impl std::fmt::Debug for AuthManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthManager")
            .field("token_expiry_hours", &self.token_expiry_hours)
            .finish_non_exhaustive()
    }
}

impl AuthManager {
    /// Create a new authentication manager
    #[must_use]
    pub fn new(jwt_secret: &[u8], token_expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(jwt_secret),
            decoding_key: DecodingKey::from_secret(jwt_secret),
            token_expiry_hours,
        }
    }

    /// Configured token lifetime
    #[must_use]
    pub const fn token_expiry_hours(&self) -> i64 {
        self.token_expiry_hours
    }

    /// Issue a signed token for an identity
    ///
    /// Every call produces a distinct token, even for identical claims, because
    /// each carries a fresh `jti`.
    ///
    /// # Errors
    ///
    /// Returns a config error if the lifetime overflows the clock, or an
    /// internal error if encoding fails
    pub fn generate_token(&self, user_id: Uuid, email: &str) -> AppResult<String> {
        let now = Utc::now();
        let expiry = Duration::try_hours(self.token_expiry_hours)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                AppError::config(format!(
                    "Token lifetime of {} hours is out of range",
                    self.token_expiry_hours
                ))
            })?;

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_owned(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            aud: service_names::CLUBHOUSE_API.to_owned(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Token encoding failed: {e}")))
    }

    /// Validate a token, collapsing every failure into `InvalidCredential`
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredential` if the token is expired, tampered, or malformed
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        self.validate_token_detailed(token).map_err(AppError::from)
    }

    /// Validate a token with detailed error information
    ///
    /// # Errors
    ///
    /// Returns a [`JwtValidationError`] if:
    /// - Token signature or audience is invalid
    /// - Token has expired
    /// - Token is malformed or not valid JWT format
    pub fn validate_token_detailed(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let claims = self.decode_token_claims(token)?;
        Self::check_token_expiry(&claims, Utc::now())?;
        Ok(claims)
    }

    /// Decode and check signature and audience, leaving expiry to the caller
    fn decode_token_claims(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_audience(&[service_names::CLUBHOUSE_API]);
        validation.set_required_spec_claims(&["exp", "sub", "aud"]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| Self::convert_jwt_error(&e))
    }

    /// Zero leeway: a token is expired from the second named in `exp`
    fn check_token_expiry(
        claims: &Claims,
        current_time: DateTime<Utc>,
    ) -> Result<(), JwtValidationError> {
        if current_time.timestamp() >= claims.exp {
            let expired_at = DateTime::from_timestamp(claims.exp, 0).unwrap_or(current_time);
            return Err(JwtValidationError::TokenExpired {
                expired_at,
                current_time,
            });
        }
        Ok(())
    }

    /// Convert JWT library errors to detailed validation errors
    fn convert_jwt_error(e: &jsonwebtoken::errors::Error) -> JwtValidationError {
        use jsonwebtoken::errors::ErrorKind;

        match e.kind() {
            ErrorKind::InvalidSignature => JwtValidationError::TokenInvalid {
                reason: "Token signature verification failed".into(),
            },
            ErrorKind::InvalidAudience => JwtValidationError::TokenInvalid {
                reason: "Token audience mismatch".into(),
            },
            ErrorKind::InvalidAlgorithm => JwtValidationError::TokenInvalid {
                reason: "Token algorithm not accepted".into(),
            },
            ErrorKind::InvalidToken => JwtValidationError::TokenMalformed {
                details: "Token format is invalid".into(),
            },
            ErrorKind::Base64(base64_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid base64: {base64_err}"),
            },
            ErrorKind::Json(json_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid JSON: {json_err}"),
            },
            ErrorKind::Utf8(utf8_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid UTF-8: {utf8_err}"),
            },
            ErrorKind::MissingRequiredClaim(claim) => JwtValidationError::TokenMalformed {
                details: format!("Token is missing required claim: {claim}"),
            },
            _ => JwtValidationError::TokenInvalid {
                reason: format!("Token validation failed: {e}"),
            },
        }
    }
}

/// Generate a random signing secret
#[must_use]
pub fn generate_jwt_secret() -> [u8; GENERATED_SECRET_BYTES] {
    let mut secret = [0u8; GENERATED_SECRET_BYTES];
    rand::thread_rng().fill_bytes(&mut secret);
    secret
}
