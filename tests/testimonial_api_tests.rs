// SPDX-License-Identifier: MIT

//! Testimonial store API tests.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_create_then_list_round_trip() {
    let (app, _state) = common::create_test_app();

    let create = Request::builder()
        .method("POST")
        .uri("/api/testimonials")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::json!({
                "name": "Grace",
                "role": "CTO",
                "message": "Delivered ahead of schedule.",
                "rating": 5
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.clone().oneshot(create).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let created = common::body_json(response).await;
    assert_eq!(created["id"], 1);
    assert_eq!(created["name"], "Grace");
    assert!(created["createdAt"].as_str().unwrap().ends_with('Z'));

    let list = Request::builder()
        .method("GET")
        .uri("/api/testimonials")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(list).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let listed = common::body_json(response).await;
    let items = listed.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["message"], "Delivered ahead of schedule.");
}

#[tokio::test]
async fn test_create_rejects_blank_name() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/testimonials")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::json!({ "name": "  ", "message": "hello" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_rejects_out_of_range_rating() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/testimonials")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::json!({
                        "name": "Grace",
                        "message": "hello",
                        "rating": 6
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
