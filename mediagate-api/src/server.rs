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

//! Router assembly and shared application state.

use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, patch};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use mediagate_core::{IdentityVerifier, MediaStore, RecordStore, ResourceType};

use crate::handlers;
use crate::middleware::{auth_middleware, cors_middleware};

/// Per-type quota configuration.
#[derive(Debug, Clone)]
pub struct QuotaSettings {
    /// Maximum stored images per user.
    pub image_limit: u32,
    /// Maximum stored video thumbnails per user.
    pub video_thumb_limit: u32,
    /// Listing page size used when counting usage.
    pub page_size: usize,
}

impl QuotaSettings {
    /// The limit that applies to one resource type.
    pub fn limit_for(&self, resource_type: ResourceType) -> u32 {
        match resource_type {
            ResourceType::Image => self.image_limit,
            ResourceType::VideoThumb => self.video_thumb_limit,
        }
    }
}

impl Default for QuotaSettings {
    fn default() -> Self {
        Self {
            image_limit: 5,
            video_thumb_limit: 5,
            page_size: 100,
        }
    }
}

/// Upload-credential configuration. `signing_key` stays server-side;
/// `public_key` and `url_endpoint` are handed to clients.
#[derive(Debug, Clone)]
pub struct CredentialSettings {
    pub ttl_seconds: i64,
    pub signing_key: String,
    pub public_key: String,
    pub url_endpoint: String,
}

/// Origin allow-list configuration.
#[derive(Debug, Clone)]
pub struct CorsSettings {
    pub allowed_origins: Vec<String>,
    pub fallback_origin: String,
}

/// Everything the HTTP surface needs beyond its collaborators.
#[derive(Debug, Clone)]
pub struct Settings {
    pub quota: QuotaSettings,
    pub credential: CredentialSettings,
    pub cors: CorsSettings,
    /// Enables the local-only unsigned-token bypass.
    pub allow_emulator_bypass: bool,
    /// Buckets new uploads by year/month inside the type namespace.
    pub month_buckets: bool,
    /// Request body cap for server-side uploads, in bytes.
    pub max_upload_size: usize,
}

/// Shared state handed to every handler and middleware.
#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<IdentityVerifier>,
    pub media: Arc<dyn MediaStore>,
    pub records: Arc<dyn RecordStore>,
    pub settings: Arc<Settings>,
}

/// Builds the full router: authenticated API routes inside the CORS
/// envelope, with tracing and a body-size cap outermost.
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/api/upload/authorize",
            get(handlers::upload_auth::authorize_upload),
        )
        .route("/api/files", get(handlers::files::list_files))
        .route("/api/files/:file_id", delete(handlers::files::delete_file))
        .route(
            "/api/media",
            get(handlers::media::list_media).post(handlers::media::upload_media),
        )
        .route(
            "/api/media/:item_id",
            patch(handlers::media::update_media).delete(handlers::media::delete_media),
        )
        .layer(from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(api)
        .fallback(not_found)
        .layer(from_fn_with_state(state.clone(), cors_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(state.settings.max_upload_size))
        .with_state(state)
}

async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "not-found", "message": "No such route" })),
    )
}
