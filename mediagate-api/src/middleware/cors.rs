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

//! Allow-list CORS.
//!
//! An allow-listed origin is echoed back; anything else (including a
//! missing Origin header) gets the configured fallback origin, so the
//! response always names exactly one origin and the browser enforces
//! the mismatch. Preflight requests are answered directly with 204 and
//! never reach authentication or handlers.

use axum::extract::{Request, State};
use axum::http::header::{self, HeaderValue};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::server::AppState;

const ALLOWED_METHODS: &str = "GET, POST, PATCH, DELETE, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type, Authorization";
const MAX_AGE_SECONDS: &str = "86400";

/// Applies the origin allow-list and answers preflights.
pub async fn cors_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let allow = allow_for(
        origin.as_deref(),
        &state.settings.cors.allowed_origins,
        &state.settings.cors.fallback_origin,
    );

    if request.method() == Method::OPTIONS {
        let mut response = StatusCode::NO_CONTENT.into_response();
        apply_headers(response.headers_mut(), &allow, true);
        return response;
    }

    let mut response = next.run(request).await;
    apply_headers(response.headers_mut(), &allow, false);
    response
}

/// Picks the origin to echo: the request's own origin when
/// allow-listed, the fallback otherwise.
fn allow_for(origin: Option<&str>, allowed: &[String], fallback: &str) -> String {
    match origin {
        Some(o) if allowed.iter().any(|a| a == o) => o.to_string(),
        _ => fallback.to_string(),
    }
}

fn apply_headers(headers: &mut HeaderMap, allow_origin: &str, preflight: bool) {
    if let Ok(value) = HeaderValue::from_str(allow_origin) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
    }
    headers.insert(header::VARY, HeaderValue::from_static("Origin"));
    if preflight {
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        );
        headers.insert(
            header::ACCESS_CONTROL_MAX_AGE,
            HeaderValue::from_static(MAX_AGE_SECONDS),
        );
    }
}
