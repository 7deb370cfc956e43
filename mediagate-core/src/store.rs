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

//! Collaborator interfaces and data models.
//!
//! The media host (object storage/CDN) and the record store (document
//! database) are external collaborators reached over narrow async
//! traits. Handlers and core flows depend only on these traits; HTTP
//! clients live in [`crate::clients`], in-memory fakes in tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::namespace::ResourceType;

/// One object as reported by the media host's listing/detail API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaFile {
    /// Host-assigned file identifier.
    pub file_id: String,
    /// File name within its folder.
    pub name: String,
    /// Full storage path. May carry a leading separator depending on
    /// the host; normalize before ownership checks.
    pub path: String,
    /// Public delivery URL.
    pub url: String,
    /// Thumbnail delivery URL, when the host generates one.
    pub thumbnail_url: Option<String>,
    /// Size in bytes.
    pub size: u64,
    /// MIME type.
    pub mime_type: Option<String>,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
}

/// Request to write one object through the media host.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Base64-encoded file payload, passed through to the host.
    pub file_data: String,
    /// Target file name.
    pub file_name: String,
    /// Target folder; always a derived namespace, never client input.
    pub folder: String,
}

/// Moderation state of a media record. Only moderation tooling may
/// change this; the update path never accepts it from clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    /// Visible.
    Ok,
    /// Hidden pending review.
    Flagged,
}

/// Metadata mirror of one uploaded object, owned by a subject through
/// its collection path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaRecord {
    /// Record identifier within the owner's collection.
    pub id: String,
    /// Media-host file identifier, when the record has a stored object.
    pub file_id: Option<String>,
    /// Authoritative storage path of the stored object.
    pub path: String,
    /// Public delivery URL.
    pub url: String,
    /// Display title.
    pub title: String,
    /// Display caption.
    pub caption: String,
    /// Moderation state.
    pub moderation: ModerationStatus,
    /// Upload timestamp.
    pub created_at: DateTime<Utc>,
    /// Last metadata update.
    pub updated_at: DateTime<Utc>,
}

/// Client-mutable record fields. The allow-list is the type: anything
/// not present here cannot be changed through the update path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordPatch {
    /// New title, if changing.
    pub title: Option<String>,
    /// New caption, if changing.
    pub caption: Option<String>,
}

impl RecordPatch {
    /// True when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.caption.is_none()
    }
}

/// Object storage/CDN collaborator.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Lists up to `limit` objects under `prefix`, skipping `skip`
    /// already-seen items. Ordering must be stable across pages (name
    /// ascending) so pagination neither double-counts nor skips.
    async fn list_files(
        &self,
        prefix: &str,
        limit: usize,
        skip: usize,
    ) -> Result<Vec<MediaFile>, CoreError>;

    /// Fetches authoritative details for one file.
    ///
    /// # Errors
    ///
    /// `NotFound` if the host has no such file.
    async fn file_details(&self, file_id: &str) -> Result<MediaFile, CoreError>;

    /// Uploads an object into the given folder.
    async fn upload(&self, request: UploadRequest) -> Result<MediaFile, CoreError>;

    /// Deletes one file.
    ///
    /// # Errors
    ///
    /// `NotFound` if the host has no such file.
    async fn delete_file(&self, file_id: &str) -> Result<(), CoreError>;
}

/// Document database collaborator. Records live in per-subject,
/// per-type collections, so the subject in every call scopes access.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetches one record, or `None` if absent.
    async fn get(
        &self,
        subject: &str,
        resource_type: ResourceType,
        item_id: &str,
    ) -> Result<Option<MediaRecord>, CoreError>;

    /// Stores a new record and returns its identifier.
    async fn put(
        &self,
        subject: &str,
        resource_type: ResourceType,
        record: MediaRecord,
    ) -> Result<String, CoreError>;

    /// Lists up to `limit` visible records, newest first.
    async fn list(
        &self,
        subject: &str,
        resource_type: ResourceType,
        limit: usize,
    ) -> Result<Vec<MediaRecord>, CoreError>;

    /// Applies an allow-listed field patch.
    ///
    /// # Errors
    ///
    /// `NotFound` if the record does not exist.
    async fn update_fields(
        &self,
        subject: &str,
        resource_type: ResourceType,
        item_id: &str,
        patch: RecordPatch,
    ) -> Result<(), CoreError>;

    /// Deletes one record.
    ///
    /// # Errors
    ///
    /// `NotFound` if the record does not exist.
    async fn delete(
        &self,
        subject: &str,
        resource_type: ResourceType,
        item_id: &str,
    ) -> Result<(), CoreError>;
}
