// ABOUTME: Tests for request id assignment and the public health endpoints
// ABOUTME: Every response from the assembled router carries an x-request-id header
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Clubhouse Contributors

#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(missing_docs)]

mod common;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    middleware,
    routing::get,
    Extension, Router,
};
use clubhouse_server::middleware::request_id::{
    request_id_middleware, RequestId, REQUEST_ID_HEADER,
};
use common::{request, send};
use std::error::Error;
use tower::ServiceExt;
use uuid::Uuid;

async fn echo_request_id(Extension(request_id): Extension<RequestId>) -> String {
    request_id.as_str().to_owned()
}

#[tokio::test]
async fn test_handler_sees_same_id_as_response_header() -> Result<(), Box<dyn Error>> {
    let app = Router::new()
        .route("/", get(echo_request_id))
        .layer(middleware::from_fn(request_id_middleware));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty())?)
        .await?;

    let header = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .ok_or("missing request id header")?
        .to_str()?
        .to_owned();
    let body = to_bytes(response.into_body(), usize::MAX).await?;

    assert!(Uuid::parse_str(&header).is_ok());
    assert_eq!(String::from_utf8(body.to_vec())?, header);
    Ok(())
}

#[tokio::test]
async fn test_ids_differ_between_requests() -> Result<(), Box<dyn Error>> {
    let app = Router::new()
        .route("/", get(|| async { "ok" }))
        .layer(middleware::from_fn(request_id_middleware));

    let first = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty())?)
        .await?;
    let second = app
        .oneshot(Request::builder().uri("/").body(Body::empty())?)
        .await?;

    assert_ne!(
        first.headers().get(REQUEST_ID_HEADER),
        second.headers().get(REQUEST_ID_HEADER)
    );
    Ok(())
}

#[tokio::test]
async fn test_denied_responses_carry_request_id() -> Result<(), Box<dyn Error>> {
    let resources = common::create_test_resources().await?;
    let app = common::test_app(&resources);

    let response = app
        .oneshot(request(Method::GET, "/users", None, None))
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    Ok(())
}

#[tokio::test]
async fn test_health_and_ready_are_public() {
    let resources = common::create_test_resources().await.unwrap();
    let app = common::test_app(&resources);

    let (status, health) = send(&app, request(Method::GET, "/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");

    let (status, ready) = send(&app, request(Method::GET, "/ready", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ready["status"], "ready");
}
