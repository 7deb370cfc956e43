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

//! Direct media-host file operations, scoped to the caller's namespace.

use axum::extract::{Extension, Path, Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use mediagate_core::{ownership, IdentityClaim, MediaFile, Namespace, ResourceType};

use crate::errors::ApiError;
use crate::server::AppState;

const DEFAULT_LIST_LIMIT: usize = 30;
const MAX_LIST_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(rename = "type")]
    resource_type: Option<String>,
    limit: Option<usize>,
    skip: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileView {
    #[serde(rename = "id")]
    pub file_id: String,
    pub name: String,
    pub path: String,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub size: u64,
    pub mime_type: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<MediaFile> for FileView {
    fn from(f: MediaFile) -> Self {
        FileView {
            file_id: f.file_id,
            name: f.name,
            path: f.path,
            url: f.url,
            thumbnail_url: f.thumbnail_url,
            size: f.size,
            mime_type: f.mime_type,
            created_at: f.created_at,
        }
    }
}

/// GET /api/files
///
/// Lists the caller's stored objects. The prefix is always derived from
/// the verified subject; a `type` selector narrows it to one segment.
pub async fn list_files(
    State(state): State<AppState>,
    Extension(claim): Extension<IdentityClaim>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, ApiError> {
    let namespace = match params.resource_type.as_deref() {
        Some(raw) => Namespace::for_type(&claim.subject, raw.parse::<ResourceType>()?),
        None => Namespace::for_subject(&claim.subject),
    };
    let limit = params
        .limit
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .min(MAX_LIST_LIMIT);
    let skip = params.skip.unwrap_or(0);

    let files = state
        .media
        .list_files(namespace.as_str(), limit, skip)
        .await?;
    let items: Vec<FileView> = files.into_iter().map(FileView::from).collect();

    Ok(Json(json!({ "items": items })))
}

/// DELETE /api/files/:file_id
///
/// Deletes one stored object after re-checking its authoritative path
/// against the caller's namespace.
pub async fn delete_file(
    State(state): State<AppState>,
    Extension(claim): Extension<IdentityClaim>,
    Path(file_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    ownership::delete_file(state.media.as_ref(), &claim.subject, &file_id).await?;
    info!(subject = %claim.subject, file_id, "file deleted");
    Ok(Json(json!({ "ok": true })))
}
