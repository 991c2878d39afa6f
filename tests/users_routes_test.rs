// ABOUTME: Integration tests for administrator identity management routes
// ABOUTME: Covers paging, creation with roles, partial updates, and deletion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Clubhouse Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use axum::http::{Method, StatusCode};
use chrono::NaiveDate;
use clubhouse_server::models::{NewEmployee, Role};
use common::{request, send, signed_in_as};
use serde_json::json;

#[tokio::test]
async fn test_list_users_paginates() {
    let resources = common::create_test_resources().await.unwrap();
    let app = common::test_app(&resources);
    let (_, admin) = signed_in_as(&resources, "admin@x.com", Role::Admin).await.unwrap();
    for i in 0..4 {
        common::create_identity_with_role(&resources, &format!("u{i}@x.com"), "pw", Role::Fan)
            .await
            .unwrap();
    }

    let (status, page) = send(
        &app,
        request(Method::GET, "/users?skip=1&take=2", Some(&admin), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 5);
    assert_eq!(page["skip"], 1);
    assert_eq!(page["take"], 2);
    let users = page["users"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|u| u.get("password_hash").is_none()));
}

#[tokio::test]
async fn test_list_users_rejects_bad_paging() {
    let resources = common::create_test_resources().await.unwrap();
    let app = common::test_app(&resources);
    let (_, admin) = signed_in_as(&resources, "admin@x.com", Role::Admin).await.unwrap();

    for uri in ["/users?skip=-1", "/users?take=abc"] {
        let (status, body) = send(&app, request(Method::GET, uri, Some(&admin), None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"]["code"], "INVALID_INPUT");
    }
}

#[tokio::test]
async fn test_only_admin_manages_users() {
    let resources = common::create_test_resources().await.unwrap();
    let app = common::test_app(&resources);

    for (email, role) in [
        ("m@x.com", Role::Manager),
        ("c@x.com", Role::Coach),
        ("p@x.com", Role::Player),
    ] {
        let (_, token) = signed_in_as(&resources, email, role).await.unwrap();
        let (status, _) = send(&app, request(Method::GET, "/users", Some(&token), None)).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{role}");
    }
}

#[tokio::test]
async fn test_admin_creates_user_with_role() {
    let resources = common::create_test_resources().await.unwrap();
    let app = common::test_app(&resources);
    let (_, admin) = signed_in_as(&resources, "admin@x.com", Role::Admin).await.unwrap();

    let (status, created) = send(
        &app,
        request(
            Method::POST,
            "/users",
            Some(&admin),
            Some(json!({"email": "coach@x.com", "password": "pw1", "role_name": "coach"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["role_name"], "Coach");

    let (status, login) = send(
        &app,
        request(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({"email": "coach@x.com", "password": "pw1"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(login["access_token"].is_string());
}

#[tokio::test]
async fn test_create_user_rejects_unknown_role_and_duplicates() {
    let resources = common::create_test_resources().await.unwrap();
    let app = common::test_app(&resources);
    let (_, admin) = signed_in_as(&resources, "admin@x.com", Role::Admin).await.unwrap();

    let (status, _) = send(
        &app,
        request(
            Method::POST,
            "/users",
            Some(&admin),
            Some(json!({"email": "n@x.com", "password": "pw1", "role_name": "Owner"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/users",
            Some(&admin),
            Some(json!({"email": "admin@x.com", "password": "pw1", "role_name": "Fan"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "DUPLICATE_IDENTITY");
}

#[tokio::test]
async fn test_admin_updates_role_and_password() {
    let resources = common::create_test_resources().await.unwrap();
    let app = common::test_app(&resources);
    let (_, admin) = signed_in_as(&resources, "admin@x.com", Role::Admin).await.unwrap();
    let target = common::create_identity_with_role(&resources, "t@x.com", "old", Role::Fan)
        .await
        .unwrap();

    let (status, updated) = send(
        &app,
        request(
            Method::PATCH,
            &format!("/users/{}", target.id),
            Some(&admin),
            Some(json!({"role_name": "Manager", "password": "new"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["role_name"], "Manager");
    assert_eq!(updated["email"], "t@x.com");

    let stored = resources
        .database
        .get_identity(target.id)
        .await
        .unwrap()
        .unwrap();
    assert!(resources.password_hasher.verify("new", &stored.password_hash));
    assert!(!resources.password_hasher.verify("old", &stored.password_hash));
}

#[tokio::test]
async fn test_update_unknown_or_malformed_id() {
    let resources = common::create_test_resources().await.unwrap();
    let app = common::test_app(&resources);
    let (_, admin) = signed_in_as(&resources, "admin@x.com", Role::Admin).await.unwrap();

    let (status, _) = send(
        &app,
        request(
            Method::PATCH,
            &format!("/users/{}", uuid::Uuid::new_v4()),
            Some(&admin),
            Some(json!({"role_name": "Coach"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        request(
            Method::PATCH,
            "/users/not-a-uuid",
            Some(&admin),
            Some(json!({})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_user_detaches_employee() {
    let resources = common::create_test_resources().await.unwrap();
    let app = common::test_app(&resources);
    let (_, admin) = signed_in_as(&resources, "admin@x.com", Role::Admin).await.unwrap();
    let staff = common::create_identity_with_role(&resources, "staff@x.com", "pw", Role::Coach)
        .await
        .unwrap();

    let employee = resources
        .database
        .create_employee(&NewEmployee {
            surname: "Ivanov".to_owned(),
            name: "Ivan".to_owned(),
            patronymic: None,
            birthdate: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
            position_id: 2,
            user_id: Some(staff.id),
        })
        .await
        .unwrap();

    let (status, _) = send(
        &app,
        request(
            Method::DELETE,
            &format!("/users/{}", staff.id),
            Some(&admin),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    assert!(resources
        .database
        .get_identity(staff.id)
        .await
        .unwrap()
        .is_none());
    let detached = resources
        .database
        .get_employee(employee.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detached.user_id, None);

    let (status, _) = send(
        &app,
        request(
            Method::DELETE,
            &format!("/users/{}", staff.id),
            Some(&admin),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
