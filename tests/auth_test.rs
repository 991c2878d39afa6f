// ABOUTME: Tests for token issuance and verification
// ABOUTME: Covers expiry, tampering, wrong secrets, and claim contents
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Clubhouse Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::Utc;
use clubhouse_server::{
    auth::{generate_jwt_secret, AuthManager, JwtValidationError},
    constants::service_names,
    errors::ErrorCode,
};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::json;
use uuid::Uuid;

const SECRET: &[u8] = b"an-integration-test-secret-of-adequate-length";

fn create_auth_manager() -> AuthManager {
    AuthManager::new(SECRET, 24)
}

#[test]
fn test_generate_and_validate_token() {
    let auth_manager = create_auth_manager();
    let user_id = Uuid::new_v4();

    let token = auth_manager.generate_token(user_id, "a@x.com").unwrap();
    assert!(!token.is_empty());

    let claims = auth_manager.validate_token(&token).unwrap();
    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.subject_id(), Some(user_id));
    assert_eq!(claims.email, "a@x.com");
    assert_eq!(claims.aud, service_names::CLUBHOUSE_API);
    assert!(claims.exp > Utc::now().timestamp());
    assert_eq!(claims.exp - claims.iat, 24 * 3600);
}

#[test]
fn test_tokens_are_unique_per_issue() {
    let auth_manager = create_auth_manager();
    let user_id = Uuid::new_v4();

    let first = auth_manager.generate_token(user_id, "a@x.com").unwrap();
    let second = auth_manager.generate_token(user_id, "a@x.com").unwrap();
    assert_ne!(first, second);
}

#[test]
fn test_out_of_range_lifetime_is_an_error() {
    for hours in [i64::MAX / 2, i64::MAX, i64::MIN] {
        let auth_manager = AuthManager::new(SECRET, hours);
        let err = auth_manager
            .generate_token(Uuid::new_v4(), "a@x.com")
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigError);
        assert_eq!(err.http_status(), 500);
    }
}

#[test]
fn test_expired_token_rejected() {
    let expired_issuer = AuthManager::new(SECRET, -1);
    let token = expired_issuer
        .generate_token(Uuid::new_v4(), "a@x.com")
        .unwrap();

    let err = create_auth_manager()
        .validate_token_detailed(&token)
        .unwrap_err();
    assert!(matches!(err, JwtValidationError::TokenExpired { .. }));
    assert!(err.to_string().contains("expired"));
}

#[test]
fn test_token_from_other_secret_rejected() {
    let other = AuthManager::new(&generate_jwt_secret(), 24);
    let token = other.generate_token(Uuid::new_v4(), "a@x.com").unwrap();

    let err = create_auth_manager()
        .validate_token_detailed(&token)
        .unwrap_err();
    assert_eq!(err.kind(), "invalid");
}

#[test]
fn test_tampered_payload_rejected() {
    let auth_manager = create_auth_manager();
    let token = auth_manager
        .generate_token(Uuid::new_v4(), "a@x.com")
        .unwrap();

    let mut parts: Vec<String> = token.split('.').map(ToOwned::to_owned).collect();
    let forged = encode(
        &Header::new(Algorithm::HS256),
        &json!({
            "sub": Uuid::new_v4().to_string(),
            "email": "admin@x.com",
            "iat": Utc::now().timestamp(),
            "exp": Utc::now().timestamp() + 3600,
            "aud": service_names::CLUBHOUSE_API,
            "jti": "forged",
        }),
        &EncodingKey::from_secret(b"attacker-chosen-secret-value-0000"),
    )
    .unwrap();
    parts[1] = forged.split('.').nth(1).unwrap().to_owned();

    assert!(auth_manager.validate_token(&parts.join(".")).is_err());
}

#[test]
fn test_wrong_audience_rejected() {
    let token = encode(
        &Header::new(Algorithm::HS256),
        &json!({
            "sub": Uuid::new_v4().to_string(),
            "email": "a@x.com",
            "iat": Utc::now().timestamp(),
            "exp": Utc::now().timestamp() + 3600,
            "aud": "some-other-service",
            "jti": "x",
        }),
        &EncodingKey::from_secret(SECRET),
    )
    .unwrap();

    let err = create_auth_manager()
        .validate_token_detailed(&token)
        .unwrap_err();
    assert_eq!(err.kind(), "invalid");
}

#[test]
fn test_malformed_token_rejected() {
    let auth_manager = create_auth_manager();

    for garbage in ["", "abc", "a.b", "a.b.c", "not-a-jwt-at-all"] {
        assert!(
            auth_manager.validate_token(garbage).is_err(),
            "accepted {garbage:?}"
        );
    }
}

#[test]
fn test_failures_collapse_to_invalid_credential() {
    let expired = AuthManager::new(SECRET, -1)
        .generate_token(Uuid::new_v4(), "a@x.com")
        .unwrap();
    let auth_manager = create_auth_manager();

    let expired_err = auth_manager.validate_token(&expired).unwrap_err();
    let garbage_err = auth_manager.validate_token("x.y.z").unwrap_err();

    assert_eq!(expired_err.code, ErrorCode::InvalidCredential);
    assert_eq!(garbage_err.code, ErrorCode::InvalidCredential);
    assert_eq!(expired_err.message, garbage_err.message);
}
