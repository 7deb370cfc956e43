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

//! Authentication middleware.
//!
//! Extracts the bearer credential (Authorization header, with an
//! `idToken` query-parameter fallback for older clients), verifies it,
//! and stores the resulting [`IdentityClaim`] in request extensions
//! for handlers. Preflight requests pass through without auth.

use axum::extract::{ConnectInfo, Request, State};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::net::SocketAddr;
use tracing::warn;

use mediagate_core::VerifyOptions;

use crate::errors::ApiError;
use crate::server::AppState;

/// Verifies the bearer credential on every non-preflight request.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if request.method() == Method::OPTIONS {
        return next.run(request).await;
    }

    let token = bearer_token(&request).unwrap_or_default();

    // The development bypass is gated on the caller being local; a
    // request without peer-address information is treated as remote.
    let is_local_caller = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().is_loopback())
        .unwrap_or(false);

    let options = VerifyOptions {
        allow_emulator_bypass: state.settings.allow_emulator_bypass,
        is_local_caller,
    };

    match state.verifier.verify(&token, &options).await {
        Ok(claim) => {
            request.extensions_mut().insert(claim);
            next.run(request).await
        }
        Err(e) => {
            warn!(error = %e, "authentication failed");
            ApiError::from(e).into_response()
        }
    }
}

/// Pulls the credential from the Authorization header, falling back to
/// the `idToken` query parameter.
fn bearer_token(request: &Request) -> Option<String> {
    if let Some(value) = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        let trimmed = value.trim();
        if trimmed.len() >= 7 && trimmed[..7].eq_ignore_ascii_case("bearer ") {
            let token = trimmed[7..].trim();
            if !token.is_empty() {
                return Some(token.to_string());
            }
        }
    }

    request.uri().query().and_then(|query| {
        query.split('&').find_map(|pair| {
            pair.strip_prefix("idToken=")
                .filter(|v| !v.is_empty())
                .map(String::from)
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request(uri: &str, auth: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().uri(uri);
        if let Some(value) = auth {
            builder = builder.header("authorization", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_bearer_header() {
        let req = request("/api/files", Some("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&req).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_bearer_header_case_insensitive() {
        let req = request("/api/files", Some("bearer tok"));
        assert_eq!(bearer_token(&req).as_deref(), Some("tok"));
    }

    #[test]
    fn test_query_fallback() {
        let req = request("/api/files?idToken=tok123&type=image", None);
        assert_eq!(bearer_token(&req).as_deref(), Some("tok123"));
    }

    #[test]
    fn test_header_wins_over_query() {
        let req = request("/api/files?idToken=from-query", Some("Bearer from-header"));
        assert_eq!(bearer_token(&req).as_deref(), Some("from-header"));
    }

    #[test]
    fn test_no_credential() {
        let req = request("/api/files", None);
        assert!(bearer_token(&req).is_none());
        let req = request("/api/files", Some("Basic dXNlcg=="));
        assert!(bearer_token(&req).is_none());
    }
}
