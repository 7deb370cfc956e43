// Copyright 2026 Mediagate Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Integration tests for the CORS allow-list and preflight handling.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use mediagate_api::create_router;
use std::sync::Arc;
use tower::ServiceExt;

use common::{body_json, signed_token, test_state, FakeMedia, FakeRecords, ALLOWED_ORIGIN};

fn app() -> axum::Router {
    create_router(test_state(
        Arc::new(FakeMedia::new()),
        Arc::new(FakeRecords::new()),
    ))
}

#[tokio::test]
async fn test_preflight_needs_no_credentials() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/upload/authorize")
        .header("Origin", "http://localhost:8888")
        .header("Access-Control-Request-Method", "GET")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let headers = response.headers();
    assert_eq!(
        headers["access-control-allow-origin"],
        "http://localhost:8888"
    );
    assert_eq!(
        headers["access-control-allow-methods"],
        "GET, POST, PATCH, DELETE, OPTIONS"
    );
    assert_eq!(
        headers["access-control-allow-headers"],
        "Content-Type, Authorization"
    );
    assert_eq!(headers["access-control-max-age"], "86400");
}

#[tokio::test]
async fn test_unlisted_origin_gets_fallback() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/files")
        .header("Origin", "https://evil.example.net")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        ALLOWED_ORIGIN
    );
}

#[tokio::test]
async fn test_actual_response_carries_cors_headers() {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/files")
        .header("Origin", ALLOWED_ORIGIN)
        .header("Authorization", format!("Bearer {}", signed_token("user-1")))
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], ALLOWED_ORIGIN);
    assert_eq!(headers["vary"], "Origin");
}

#[tokio::test]
async fn test_error_response_carries_cors_headers() {
    // Browsers cannot read the error body without the CORS headers, so
    // even a 401 must carry them.
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/files")
        .header("Origin", ALLOWED_ORIGIN)
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        ALLOWED_ORIGIN
    );
}

#[tokio::test]
async fn test_unknown_route_is_json_not_found() {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/nope")
        .header("Origin", ALLOWED_ORIGIN)
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        ALLOWED_ORIGIN
    );
    let body = body_json(response.into_body()).await;
    assert_eq!(body["error"], "not-found");
}
