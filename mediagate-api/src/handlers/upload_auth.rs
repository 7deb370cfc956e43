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

//! Upload authorization: the quota-gated credential mint.

use axum::extract::{Extension, Query, State};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use mediagate_core::credential;
use mediagate_core::quota;
use mediagate_core::{CoreError, IdentityClaim, Namespace, ResourceType};

use crate::errors::ApiError;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct AuthorizeParams {
    #[serde(rename = "type")]
    resource_type: Option<String>,
}

/// Response shape expected by the upload-widget SDK, plus the quota
/// snapshot for client-side display.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizeResponse {
    pub token: String,
    pub expire: i64,
    pub signature: String,
    pub public_config: PublicConfig,
    pub namespace: String,
    pub used: u32,
    pub limit: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicConfig {
    pub public_key: String,
    pub url_endpoint: String,
}

/// GET /api/upload/authorize
///
/// Counts the caller's live usage under the type-scoped namespace and
/// mints a short-lived upload credential when under quota. Ties deny.
pub async fn authorize_upload(
    State(state): State<AppState>,
    Extension(claim): Extension<IdentityClaim>,
    Query(params): Query<AuthorizeParams>,
) -> Result<Json<AuthorizeResponse>, ApiError> {
    let resource_type: ResourceType =
        params.resource_type.as_deref().unwrap_or("image").parse()?;
    let limit = state.settings.quota.limit_for(resource_type);

    // Usage is always counted at the type level so every past upload
    // counts against the quota regardless of bucketing.
    let count_ns = Namespace::for_type(&claim.subject, resource_type);
    let decision = quota::admit(
        state.media.as_ref(),
        &count_ns,
        limit,
        state.settings.quota.page_size,
    )
    .await;

    if !decision.allowed {
        return Err(CoreError::QuotaExceeded {
            used: decision.used,
            limit: decision.limit,
        }
        .into());
    }

    let target_ns = if state.settings.month_buckets {
        Namespace::for_resource(&claim.subject, resource_type, Utc::now())
    } else {
        count_ns
    };

    let cred = credential::mint(
        state.settings.credential.ttl_seconds,
        state.settings.credential.signing_key.as_bytes(),
        Utc::now(),
    );

    info!(
        subject = %claim.subject,
        %resource_type,
        used = decision.used,
        limit = decision.limit,
        "upload authorized"
    );

    Ok(Json(AuthorizeResponse {
        token: cred.token,
        expire: cred.expire,
        signature: cred.signature,
        public_config: PublicConfig {
            public_key: state.settings.credential.public_key.clone(),
            url_endpoint: state.settings.credential.url_endpoint.clone(),
        },
        namespace: target_ns.as_str().to_string(),
        used: decision.used,
        limit: decision.limit,
    }))
}
