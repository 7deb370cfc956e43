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

//! REST client for the document database holding media records.
//!
//! Records live in per-subject, per-type collections at
//! `/users/{subject}/{collection}` and documents at
//! `/users/{subject}/{collection}/{id}`. Field updates go through
//! PATCH so moderation state never travels on the client path.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

use crate::error::CoreError;
use crate::namespace::ResourceType;
use crate::store::{MediaRecord, RecordPatch, RecordStore};

/// Document database REST API client.
pub struct HttpRecordStore {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct CreatedDoc {
    id: String,
}

impl HttpRecordStore {
    /// Creates a client for the document API at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self, subject: &str, resource_type: ResourceType) -> String {
        format!(
            "{}/users/{subject}/{}",
            self.base_url,
            resource_type.collection()
        )
    }

    fn doc_url(&self, subject: &str, resource_type: ResourceType, item_id: &str) -> String {
        format!("{}/{item_id}", self.collection_url(subject, resource_type))
    }
}

fn transport(e: reqwest::Error) -> CoreError {
    CoreError::Upstream(format!("record store request failed: {e}"))
}

fn map_status(status: StatusCode) -> CoreError {
    if status == StatusCode::NOT_FOUND {
        CoreError::NotFound
    } else {
        CoreError::Upstream(format!("record store returned {status}"))
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn get(
        &self,
        subject: &str,
        resource_type: ResourceType,
        item_id: &str,
    ) -> Result<Option<MediaRecord>, CoreError> {
        let response = self
            .client
            .get(self.doc_url(subject, resource_type, item_id))
            .send()
            .await
            .map_err(transport)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(map_status(response.status()));
        }

        let record: MediaRecord = response.json().await.map_err(transport)?;
        Ok(Some(record))
    }

    async fn put(
        &self,
        subject: &str,
        resource_type: ResourceType,
        record: MediaRecord,
    ) -> Result<String, CoreError> {
        let response = self
            .client
            .post(self.collection_url(subject, resource_type))
            .json(&record)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(map_status(response.status()));
        }

        let created: CreatedDoc = response.json().await.map_err(transport)?;
        Ok(created.id)
    }

    async fn list(
        &self,
        subject: &str,
        resource_type: ResourceType,
        limit: usize,
    ) -> Result<Vec<MediaRecord>, CoreError> {
        let response = self
            .client
            .get(self.collection_url(subject, resource_type))
            .query(&[
                ("moderation", "ok"),
                ("order", "created_at:desc"),
                ("limit", &limit.to_string()),
            ])
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(map_status(response.status()));
        }

        let records: Vec<MediaRecord> = response.json().await.map_err(transport)?;
        Ok(records)
    }

    async fn update_fields(
        &self,
        subject: &str,
        resource_type: ResourceType,
        item_id: &str,
        patch: RecordPatch,
    ) -> Result<(), CoreError> {
        let mut fields = serde_json::Map::new();
        if let Some(title) = patch.title {
            fields.insert("title".to_string(), json!(title));
        }
        if let Some(caption) = patch.caption {
            fields.insert("caption".to_string(), json!(caption));
        }
        fields.insert("updated_at".to_string(), json!(chrono::Utc::now()));

        let response = self
            .client
            .patch(self.doc_url(subject, resource_type, item_id))
            .json(&fields)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(map_status(response.status()));
        }
        Ok(())
    }

    async fn delete(
        &self,
        subject: &str,
        resource_type: ResourceType,
        item_id: &str,
    ) -> Result<(), CoreError> {
        let response = self
            .client
            .delete(self.doc_url(subject, resource_type, item_id))
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(map_status(response.status()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_scope_by_subject_and_collection() {
        let store = HttpRecordStore::new("https://docs.example.com/");
        assert_eq!(
            store.collection_url("u1", ResourceType::Image),
            "https://docs.example.com/users/u1/media_images"
        );
        assert_eq!(
            store.doc_url("u1", ResourceType::VideoThumb, "i9"),
            "https://docs.example.com/users/u1/media_videos/i9"
        );
    }
}
