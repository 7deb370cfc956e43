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

//! REST client for the media host (object storage/CDN).
//!
//! The host authenticates with the private API key as the basic-auth
//! username. Listing is paginated with `limit`/`skip` and sorted by
//! name ascending so cursors stay monotonic across pages.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

use crate::error::CoreError;
use crate::store::{MediaFile, MediaStore, UploadRequest};

/// Media host REST API client.
pub struct HttpMediaHost {
    client: reqwest::Client,
    base_url: String,
    private_key: String,
}

/// File DTO as the host returns it.
#[derive(Debug, Deserialize)]
struct HostFile {
    #[serde(rename = "fileId")]
    file_id: String,
    name: String,
    #[serde(rename = "filePath")]
    file_path: String,
    url: String,
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default)]
    size: u64,
    #[serde(default)]
    mime: Option<String>,
    #[serde(default, rename = "createdAt")]
    created_at: Option<DateTime<Utc>>,
}

impl From<HostFile> for MediaFile {
    fn from(f: HostFile) -> Self {
        MediaFile {
            file_id: f.file_id,
            name: f.name,
            path: f.file_path,
            url: f.url,
            thumbnail_url: f.thumbnail,
            size: f.size,
            mime_type: f.mime,
            created_at: f.created_at,
        }
    }
}

impl HttpMediaHost {
    /// Creates a client for the host API at `base_url`, signing
    /// requests with `private_key`.
    pub fn new(base_url: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            private_key: private_key.into(),
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .basic_auth(&self.private_key, Some(""))
    }
}

fn map_status(status: StatusCode) -> CoreError {
    if status == StatusCode::NOT_FOUND {
        CoreError::NotFound
    } else {
        CoreError::Upstream(format!("media host returned {status}"))
    }
}

fn transport(e: reqwest::Error) -> CoreError {
    CoreError::Upstream(format!("media host request failed: {e}"))
}

#[async_trait]
impl MediaStore for HttpMediaHost {
    async fn list_files(
        &self,
        prefix: &str,
        limit: usize,
        skip: usize,
    ) -> Result<Vec<MediaFile>, CoreError> {
        let response = self
            .request(reqwest::Method::GET, "/v1/files")
            .query(&[
                ("path", prefix),
                ("sort", "ASC_NAME"),
                ("limit", &limit.to_string()),
                ("skip", &skip.to_string()),
            ])
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(map_status(response.status()));
        }

        let files: Vec<HostFile> = response.json().await.map_err(transport)?;
        Ok(files.into_iter().map(MediaFile::from).collect())
    }

    async fn file_details(&self, file_id: &str) -> Result<MediaFile, CoreError> {
        let response = self
            .request(reqwest::Method::GET, &format!("/v1/files/{file_id}/details"))
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(map_status(response.status()));
        }

        let file: HostFile = response.json().await.map_err(transport)?;
        Ok(file.into())
    }

    async fn upload(&self, request: UploadRequest) -> Result<MediaFile, CoreError> {
        let response = self
            .request(reqwest::Method::POST, "/v1/files/upload")
            .json(&json!({
                "file": request.file_data,
                "fileName": request.file_name,
                "folder": request.folder,
                "useUniqueFileName": true,
            }))
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(map_status(response.status()));
        }

        let file: HostFile = response.json().await.map_err(transport)?;
        Ok(file.into())
    }

    async fn delete_file(&self, file_id: &str) -> Result<(), CoreError> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("/v1/files/{file_id}"))
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(map_status(response.status()));
        }
        Ok(())
    }
}
