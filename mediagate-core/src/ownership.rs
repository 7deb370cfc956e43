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

//! Ownership-checked delete and update flows.
//!
//! Authorization never trusts a client-supplied path or subject: the
//! resource's authoritative path is always re-fetched from the media
//! host or the record store before any mutation.

use tracing::warn;

use crate::error::CoreError;
use crate::namespace::{Namespace, ResourceType};
use crate::store::{MediaStore, RecordPatch, RecordStore};

/// Result of an item delete. `storage_deleted` is the partial-failure
/// flag: false means the record is gone but the stored object may
/// linger on the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Whether the media-host object was removed (or there was none).
    pub storage_deleted: bool,
}

/// Asserts that `path` (as fetched from a collaborator) lies inside the
/// subject's namespace.
pub fn check_ownership(namespace: &Namespace, path: &str) -> Result<(), CoreError> {
    if namespace.owns(path) {
        Ok(())
    } else {
        Err(CoreError::Forbidden)
    }
}

/// Deletes a file directly from the media host.
///
/// Re-fetches the file's details and checks the authoritative path
/// against the caller's namespace before deleting.
///
/// # Errors
///
/// `NotFound` if the host has no such file, `Forbidden` if the path
/// lies outside the caller's namespace, `Upstream` on host failures
/// during the delete itself.
pub async fn delete_file(
    media: &dyn MediaStore,
    subject: &str,
    file_id: &str,
) -> Result<(), CoreError> {
    let details = media.file_details(file_id).await?;
    let namespace = Namespace::for_subject(subject);
    check_ownership(&namespace, &details.path)?;
    media.delete_file(file_id).await
}

/// Deletes a media record and its stored object.
///
/// The record store is authoritative: storage deletion is attempted
/// first and is best-effort (a failure is logged and surfaced through
/// [`DeleteOutcome::storage_deleted`]), record deletion is then
/// mandatory and its failure aborts the operation.
pub async fn delete_item(
    media: &dyn MediaStore,
    records: &dyn RecordStore,
    subject: &str,
    resource_type: ResourceType,
    item_id: &str,
) -> Result<DeleteOutcome, CoreError> {
    let record = records
        .get(subject, resource_type, item_id)
        .await?
        .ok_or(CoreError::NotFound)?;

    let namespace = Namespace::for_subject(subject);
    if !record.path.is_empty() {
        check_ownership(&namespace, &record.path)?;
    }

    let storage_deleted = match &record.file_id {
        Some(file_id) => match media.delete_file(file_id).await {
            Ok(()) => true,
            // An already-gone object is as deleted as it gets.
            Err(CoreError::NotFound) => true,
            Err(e) => {
                warn!(item_id, error = %e, "storage deletion failed, record will still be removed");
                false
            }
        },
        None => true,
    };

    records.delete(subject, resource_type, item_id).await?;
    Ok(DeleteOutcome { storage_deleted })
}

/// Updates a record's client-mutable fields.
///
/// The patch type is the allow-list: only title and caption can change
/// through this path, never moderation state.
///
/// # Errors
///
/// `NotFound` if the record does not exist, `Forbidden` if its
/// recorded path lies outside the caller's namespace.
pub async fn update_item(
    records: &dyn RecordStore,
    subject: &str,
    resource_type: ResourceType,
    item_id: &str,
    patch: RecordPatch,
) -> Result<(), CoreError> {
    let record = records
        .get(subject, resource_type, item_id)
        .await?
        .ok_or(CoreError::NotFound)?;

    let namespace = Namespace::for_subject(subject);
    if !record.path.is_empty() {
        check_ownership(&namespace, &record.path)?;
    }

    records
        .update_fields(subject, resource_type, item_id, patch)
        .await
}
