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

//! API error responses.
//!
//! Every failure maps to a small structured body
//! `{error: <kind>, message: <generic string>}`. Messages never name a
//! collaborator vendor or reveal which verification step failed.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use mediagate_core::CoreError;

/// Wrapper turning a [`CoreError`] into an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub CoreError);

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        ApiError(e)
    }
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            CoreError::MissingToken
            | CoreError::MissingAudience
            | CoreError::InvalidToken => StatusCode::UNAUTHORIZED,
            CoreError::QuotaExceeded { .. } | CoreError::Forbidden => StatusCode::FORBIDDEN,
            CoreError::NotFound => StatusCode::NOT_FOUND,
            CoreError::InvalidResourceType(_) | CoreError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            CoreError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let CoreError::Upstream(detail) = &self.0 {
            // Detail stays in the log; the response body is generic.
            error!(detail = %detail, "upstream failure");
        }

        let body = json!({
            "error": self.0.kind(),
            "message": self.0.to_string(),
        });
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError(CoreError::MissingToken).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError(CoreError::QuotaExceeded { used: 5, limit: 5 }).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError(CoreError::NotFound).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError(CoreError::Upstream("x".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError(CoreError::InvalidResourceType("gif".into())).status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
