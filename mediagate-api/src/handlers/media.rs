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

//! Media item flows: server-side upload plus listing, metadata update,
//! and delete of record-backed items.

use axum::extract::{Extension, Path, Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use mediagate_core::store::{ModerationStatus, UploadRequest};
use mediagate_core::{
    ownership, CoreError, IdentityClaim, MediaRecord, Namespace, RecordPatch, ResourceType,
};

use crate::errors::ApiError;
use crate::server::AppState;

const DEFAULT_LIST_LIMIT: usize = 50;
const MAX_LIST_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
pub struct TypeParams {
    #[serde(rename = "type")]
    resource_type: Option<String>,
    limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadBody {
    #[serde(rename = "type")]
    resource_type: Option<String>,
    file_data: String,
    title: Option<String>,
    caption: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub id: String,
    pub file_id: Option<String>,
    pub path: String,
    pub url: String,
    pub title: String,
    pub caption: String,
    pub moderation: ModerationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MediaRecord> for ItemView {
    fn from(r: MediaRecord) -> Self {
        ItemView {
            id: r.id,
            file_id: r.file_id,
            path: r.path,
            url: r.url,
            title: r.title,
            caption: r.caption,
            moderation: r.moderation,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

fn parse_type(raw: Option<&str>) -> Result<ResourceType, CoreError> {
    raw.unwrap_or("image").parse()
}

fn default_title(resource_type: ResourceType) -> &'static str {
    match resource_type {
        ResourceType::Image => "Untitled Image",
        ResourceType::VideoThumb => "Untitled Video",
    }
}

fn file_name_for(resource_type: ResourceType) -> String {
    let prefix = match resource_type {
        ResourceType::Image => "img",
        ResourceType::VideoThumb => "thumb",
    };
    format!("{prefix}_{}", Uuid::new_v4())
}

/// POST /api/media
///
/// Server-side upload: stores the payload under the caller's derived
/// namespace and mirrors it as a record. Quota applies only to the
/// credential path; this path is trusted tooling.
pub async fn upload_media(
    State(state): State<AppState>,
    Extension(claim): Extension<IdentityClaim>,
    Json(body): Json<UploadBody>,
) -> Result<Json<Value>, ApiError> {
    let resource_type = parse_type(body.resource_type.as_deref())?;
    if body.file_data.is_empty() {
        return Err(CoreError::InvalidRequest("fileData is required".to_string()).into());
    }

    let folder = if state.settings.month_buckets {
        Namespace::for_resource(&claim.subject, resource_type, Utc::now())
    } else {
        Namespace::for_type(&claim.subject, resource_type)
    };

    let file = state
        .media
        .upload(UploadRequest {
            file_data: body.file_data,
            file_name: file_name_for(resource_type),
            folder: folder.as_str().to_string(),
        })
        .await?;

    let now = Utc::now();
    let record = MediaRecord {
        id: String::new(),
        file_id: Some(file.file_id.clone()),
        path: file.path.clone(),
        url: file.url.clone(),
        title: body
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| default_title(resource_type).to_string()),
        caption: body.caption.unwrap_or_default(),
        moderation: ModerationStatus::Ok,
        created_at: now,
        updated_at: now,
    };
    let item_id = state
        .records
        .put(&claim.subject, resource_type, record)
        .await?;

    info!(subject = %claim.subject, %resource_type, item_id, "media uploaded");

    Ok(Json(json!({
        "url": file.url,
        "fileId": file.file_id,
        "itemId": item_id,
    })))
}

/// GET /api/media
///
/// Lists the caller's visible media records, newest first.
pub async fn list_media(
    State(state): State<AppState>,
    Extension(claim): Extension<IdentityClaim>,
    Query(params): Query<TypeParams>,
) -> Result<Json<Value>, ApiError> {
    let resource_type = parse_type(params.resource_type.as_deref())?;
    let limit = params
        .limit
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .min(MAX_LIST_LIMIT);

    let items = state
        .records
        .list(&claim.subject, resource_type, limit)
        .await?;
    let items: Vec<ItemView> = items.into_iter().map(ItemView::from).collect();

    Ok(Json(json!({ "items": items })))
}

/// PATCH /api/media/:item_id
///
/// Updates the record's client-mutable fields. The patch type is the
/// allow-list; an empty patch is rejected.
pub async fn update_media(
    State(state): State<AppState>,
    Extension(claim): Extension<IdentityClaim>,
    Path(item_id): Path<String>,
    Query(params): Query<TypeParams>,
    Json(patch): Json<RecordPatch>,
) -> Result<Json<Value>, ApiError> {
    let resource_type = parse_type(params.resource_type.as_deref())?;
    if patch.is_empty() {
        return Err(CoreError::InvalidRequest("no updatable fields".to_string()).into());
    }

    ownership::update_item(
        state.records.as_ref(),
        &claim.subject,
        resource_type,
        &item_id,
        patch,
    )
    .await?;

    info!(subject = %claim.subject, item_id, "media updated");
    Ok(Json(json!({ "ok": true })))
}

/// DELETE /api/media/:item_id
///
/// Deletes the record and, best-effort, its stored object. The response
/// surfaces the partial-failure case via `storageDeleted`.
pub async fn delete_media(
    State(state): State<AppState>,
    Extension(claim): Extension<IdentityClaim>,
    Path(item_id): Path<String>,
    Query(params): Query<TypeParams>,
) -> Result<Json<Value>, ApiError> {
    let resource_type = parse_type(params.resource_type.as_deref())?;

    let outcome = ownership::delete_item(
        state.media.as_ref(),
        state.records.as_ref(),
        &claim.subject,
        resource_type,
        &item_id,
    )
    .await?;

    info!(
        subject = %claim.subject,
        item_id,
        storage_deleted = outcome.storage_deleted,
        "media deleted"
    );
    Ok(Json(json!({
        "ok": true,
        "storageDeleted": outcome.storage_deleted,
    })))
}
