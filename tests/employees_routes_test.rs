// ABOUTME: Integration tests for employee management routes
// ABOUTME: Admins and managers may manage staff; other roles are forbidden
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Clubhouse Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use axum::http::{Method, StatusCode};
use clubhouse_server::models::Role;
use common::{request, send, signed_in_as};
use serde_json::{json, Value};

fn new_employee() -> Value {
    json!({
        "surname": "Petrova",
        "name": "Anna",
        "patronymic": "Sergeevna",
        "birthdate": "1988-02-29",
        "position_id": 3
    })
}

#[tokio::test]
async fn test_manager_crud_cycle() {
    let resources = common::create_test_resources().await.unwrap();
    let app = common::test_app(&resources);
    let (_, manager) = signed_in_as(&resources, "m@x.com", Role::Manager).await.unwrap();

    let (status, created) = send(
        &app,
        request(Method::POST, "/employees", Some(&manager), Some(new_employee())),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["birthdate"], "1988-02-29");

    let (status, updated) = send(
        &app,
        request(
            Method::PATCH,
            &format!("/employees/{id}"),
            Some(&manager),
            Some(json!({"position_id": 5})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["position_id"], 5);
    assert_eq!(updated["surname"], "Petrova");

    let (status, listed) = send(&app, request(Method::GET, "/employees", Some(&manager), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app,
        request(Method::DELETE, &format!("/employees/{id}"), Some(&manager), None),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        request(Method::GET, &format!("/employees/{id}"), Some(&manager), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_concurrent_patches_keep_both_fields() {
    let resources = common::create_test_resources().await.unwrap();
    let app = common::test_app(&resources);
    let (_, admin) = signed_in_as(&resources, "a@x.com", Role::Admin).await.unwrap();

    let (_, created) = send(
        &app,
        request(Method::POST, "/employees", Some(&admin), Some(new_employee())),
    )
    .await;
    let uri = format!("/employees/{}", created["id"]);

    let ((first, _), (second, _)) = tokio::join!(
        send(
            &app,
            request(Method::PATCH, &uri, Some(&admin), Some(json!({"surname": "Orlova"}))),
        ),
        send(
            &app,
            request(Method::PATCH, &uri, Some(&admin), Some(json!({"position_id": 4}))),
        ),
    );
    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);

    let (_, stored) = send(&app, request(Method::GET, &uri, Some(&admin), None)).await;
    assert_eq!(stored["surname"], "Orlova");
    assert_eq!(stored["position_id"], 4);
    assert_eq!(stored["patronymic"], "Sergeevna");

    let (status, _) = send(
        &app,
        request(
            Method::PATCH,
            "/employees/9999",
            Some(&admin),
            Some(json!({"name": "Nobody"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_coach_and_fan_forbidden() {
    let resources = common::create_test_resources().await.unwrap();
    let app = common::test_app(&resources);

    for (email, role) in [("c@x.com", Role::Coach), ("f@x.com", Role::Fan)] {
        let (_, token) = signed_in_as(&resources, email, role).await.unwrap();
        let (status, _) = send(
            &app,
            request(Method::POST, "/employees", Some(&token), Some(new_employee())),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{role}");
    }
    assert!(resources.database.list_employees().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_employee_payloads() {
    let resources = common::create_test_resources().await.unwrap();
    let app = common::test_app(&resources);
    let (_, admin) = signed_in_as(&resources, "a@x.com", Role::Admin).await.unwrap();

    let mut blank_name = new_employee();
    blank_name["name"] = json!("  ");
    let mut bad_date = new_employee();
    bad_date["birthdate"] = json!("1988-13-01");
    let mut unknown_user = new_employee();
    unknown_user["user_id"] = json!(uuid::Uuid::new_v4());

    for body in [blank_name, bad_date, unknown_user] {
        let (status, error) = send(
            &app,
            request(Method::POST, "/employees", Some(&admin), Some(body.clone())),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "accepted {body}");
        assert_eq!(error["error"]["code"], "INVALID_INPUT");
    }
}

#[tokio::test]
async fn test_employee_linked_to_identity() {
    let resources = common::create_test_resources().await.unwrap();
    let app = common::test_app(&resources);
    let (admin_identity, admin) = signed_in_as(&resources, "a@x.com", Role::Admin).await.unwrap();

    let mut body = new_employee();
    body["user_id"] = json!(admin_identity.id);
    let (status, created) = send(
        &app,
        request(Method::POST, "/employees", Some(&admin), Some(body)),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["user_id"], json!(admin_identity.id));
}
