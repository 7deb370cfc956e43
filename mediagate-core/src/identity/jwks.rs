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

//! Issuer public-key set: fetching and caching.

use async_trait::async_trait;
use jsonwebtoken::DecodingKey;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::CoreError;

/// Well-known JWKS endpoint for the identity issuer's signing keys.
pub const DEFAULT_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

/// One RSA public key from the issuer's key set.
#[derive(Debug, Clone, Deserialize)]
pub struct Jwk {
    /// Key identifier, matched against the token header.
    pub kid: String,
    /// Base64url modulus.
    pub n: String,
    /// Base64url exponent.
    pub e: String,
}

#[derive(Debug, Deserialize)]
struct JwkSet {
    keys: Vec<Jwk>,
}

/// Source of the issuer's current public keys.
#[async_trait]
pub trait KeyProvider: Send + Sync {
    /// Fetches the full current key set.
    async fn fetch_keys(&self) -> Result<Vec<Jwk>, CoreError>;
}

/// Fetches the key set from the issuer's well-known HTTPS endpoint.
pub struct HttpKeyProvider {
    client: reqwest::Client,
    url: String,
}

impl HttpKeyProvider {
    /// Creates a provider for the default well-known endpoint.
    pub fn new() -> Self {
        Self::with_url(DEFAULT_JWKS_URL)
    }

    /// Creates a provider for a custom endpoint (test issuers).
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

impl Default for HttpKeyProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyProvider for HttpKeyProvider {
    async fn fetch_keys(&self) -> Result<Vec<Jwk>, CoreError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| CoreError::Upstream(format!("key fetch failed: {e}")))?
            .error_for_status()
            .map_err(|e| CoreError::Upstream(format!("key fetch failed: {e}")))?;

        let set: JwkSet = response
            .json()
            .await
            .map_err(|e| CoreError::Upstream(format!("key set malformed: {e}")))?;

        Ok(set.keys)
    }
}

/// Process-wide cache of decoding keys, keyed by `kid`.
///
/// Key material rotates infrequently, so the cache is read-mostly.
/// A `kid` miss triggers one full re-fetch before failing, which is
/// how staleness self-heals after issuer key rotation.
pub struct KeyCache {
    provider: Arc<dyn KeyProvider>,
    keys: RwLock<HashMap<String, DecodingKey>>,
}

impl KeyCache {
    /// Creates an empty cache backed by `provider`.
    pub fn new(provider: Arc<dyn KeyProvider>) -> Self {
        Self {
            provider,
            keys: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the decoding key for `kid`, refreshing the cache once on
    /// a miss.
    ///
    /// # Errors
    ///
    /// `InvalidToken` if the issuer does not publish `kid` even after a
    /// refresh; `Upstream` if the key set cannot be fetched.
    pub async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, CoreError> {
        if let Some(key) = self.keys.read().await.get(kid) {
            return Ok(key.clone());
        }

        debug!(kid, "key cache miss, refreshing key set");
        let fetched = self.provider.fetch_keys().await?;

        let mut rebuilt = HashMap::with_capacity(fetched.len());
        for jwk in fetched {
            match DecodingKey::from_rsa_components(&jwk.n, &jwk.e) {
                Ok(key) => {
                    rebuilt.insert(jwk.kid, key);
                }
                Err(e) => {
                    warn!(kid = %jwk.kid, error = %e, "skipping unusable issuer key");
                }
            }
        }

        let mut guard = self.keys.write().await;
        *guard = rebuilt;
        guard.get(kid).cloned().ok_or(CoreError::InvalidToken)
    }
}
