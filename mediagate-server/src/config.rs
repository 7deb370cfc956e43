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

//! Configuration management for the Mediagate server.
//!
//! Everything is read from `MG_*` environment variables. Collaborator
//! credentials (`MG_PROJECT_ID`, `MG_MEDIA_PRIVATE_KEY`) have no
//! defaults and fail startup when absent; tunables fall back to
//! sensible defaults.

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings (bind address, body cap)
    pub server: ServerConfig,
    /// Identity issuer settings
    pub identity: IdentityConfig,
    /// Media host (object storage/CDN) settings
    pub media_host: MediaHostConfig,
    /// Record store settings
    pub records: RecordsConfig,
    /// Per-type quota settings
    pub quota: QuotaConfig,
    /// Upload credential settings
    pub credential: CredentialConfig,
    /// CORS allow-list settings
    pub cors: CorsConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8788").
    /// Can be set via the MG_BIND environment variable.
    pub bind: String,
    /// Maximum request body size in bytes.
    /// Can be set via MG_MAX_UPLOAD_SIZE (e.g., "8MB", "512KB", "4096").
    pub max_upload_size: usize,
}

/// Identity issuer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Issuer project id; doubles as the expected token audience.
    /// Set via MG_PROJECT_ID (required).
    pub project_id: String,
    /// Custom JWKS endpoint, for test issuers.
    /// Set via MG_JWKS_URL.
    pub jwks_url: Option<String>,
    /// Enables the unsigned-token bypass for loopback callers.
    /// Set via MG_EMULATOR_BYPASS. Never enable in production.
    pub allow_emulator_bypass: bool,
}

/// Media host configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaHostConfig {
    /// Host API base URL. Set via MG_MEDIA_API_URL.
    pub api_url: String,
    /// Private API key; also keys the credential MAC.
    /// Set via MG_MEDIA_PRIVATE_KEY (required).
    pub private_key: String,
    /// Public API key handed to upload clients.
    /// Set via MG_MEDIA_PUBLIC_KEY.
    pub public_key: String,
    /// CDN delivery endpoint handed to upload clients.
    /// Set via MG_MEDIA_URL_ENDPOINT.
    pub url_endpoint: String,
}

/// Record store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordsConfig {
    /// Document API base URL. Set via MG_RECORDS_URL.
    pub api_url: String,
}

/// Quota configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotaConfig {
    /// Maximum stored images per user. Set via MG_IMAGE_LIMIT.
    pub image_limit: u32,
    /// Maximum stored video thumbnails per user.
    /// Set via MG_VIDEO_THUMB_LIMIT.
    pub video_thumb_limit: u32,
    /// Listing page size used when counting usage.
    /// Set via MG_QUOTA_PAGE_SIZE.
    pub page_size: usize,
}

/// Upload credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialConfig {
    /// Credential lifetime in seconds. Set via MG_CREDENTIAL_TTL.
    pub ttl_seconds: i64,
    /// Buckets new uploads by year/month. Set via MG_MONTH_BUCKETS.
    pub month_buckets: bool,
}

/// CORS configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated origin allow-list. Set via MG_ALLOWED_ORIGINS.
    pub allowed_origins: Vec<String>,
    /// Origin echoed to unlisted callers. Set via MG_FALLBACK_ORIGIN.
    pub fallback_origin: String,
}

/// Parses a size string like "8MB", "512KB", "4096" into bytes.
///
/// Supported suffixes (case-insensitive): GB/G, MB/M, KB/K, B or none.
pub fn parse_size(s: &str) -> Result<usize, String> {
    let s = s.trim().to_uppercase();

    if s.is_empty() {
        return Err("Empty size string".to_string());
    }

    let num_end = s
        .chars()
        .position(|c| !c.is_ascii_digit() && c != '.')
        .unwrap_or(s.len());
    let (num_str, suffix) = s.split_at(num_end);
    let suffix = suffix.trim();

    let num: f64 = num_str
        .parse()
        .map_err(|_| format!("Invalid number: {num_str}"))?;

    let multiplier: usize = match suffix {
        "GB" | "G" => 1024 * 1024 * 1024,
        "MB" | "M" => 1024 * 1024,
        "KB" | "K" => 1024,
        "B" | "" => 1,
        _ => return Err(format!("Unknown size suffix: {suffix}")),
    };

    Ok((num * multiplier as f64) as usize)
}

fn env_bool(name: &str, default: bool) -> bool {
    std::env::var(name)
        .map(|s| s.to_lowercase() == "true" || s == "1")
        .unwrap_or(default)
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

impl Config {
    /// Loads configuration from the environment.
    ///
    /// # Errors
    ///
    /// Fails when a required secret (MG_PROJECT_ID,
    /// MG_MEDIA_PRIVATE_KEY) is absent, rather than starting with
    /// authentication or signing silently broken.
    pub fn load() -> anyhow::Result<Self> {
        let project_id =
            std::env::var("MG_PROJECT_ID").context("MG_PROJECT_ID is required")?;
        let private_key = std::env::var("MG_MEDIA_PRIVATE_KEY")
            .context("MG_MEDIA_PRIVATE_KEY is required")?;

        let allowed_origins: Vec<String> = env_or(
            "MG_ALLOWED_ORIGINS",
            "http://localhost:8888,http://localhost:3000",
        )
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

        Ok(Self {
            server: ServerConfig {
                bind: env_or("MG_BIND", "127.0.0.1:8788"),
                max_upload_size: std::env::var("MG_MAX_UPLOAD_SIZE")
                    .ok()
                    .and_then(|s| parse_size(&s).ok())
                    .unwrap_or(8 * 1024 * 1024),
            },
            identity: IdentityConfig {
                project_id,
                jwks_url: std::env::var("MG_JWKS_URL").ok(),
                allow_emulator_bypass: env_bool("MG_EMULATOR_BYPASS", false),
            },
            media_host: MediaHostConfig {
                api_url: env_or("MG_MEDIA_API_URL", "https://api.imagekit.io"),
                private_key,
                public_key: env_or("MG_MEDIA_PUBLIC_KEY", ""),
                url_endpoint: env_or("MG_MEDIA_URL_ENDPOINT", ""),
            },
            records: RecordsConfig {
                api_url: env_or("MG_RECORDS_URL", "http://127.0.0.1:8080/v1"),
            },
            quota: QuotaConfig {
                image_limit: std::env::var("MG_IMAGE_LIMIT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
                video_thumb_limit: std::env::var("MG_VIDEO_THUMB_LIMIT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
                page_size: std::env::var("MG_QUOTA_PAGE_SIZE")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(100),
            },
            credential: CredentialConfig {
                ttl_seconds: std::env::var("MG_CREDENTIAL_TTL")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(300),
                month_buckets: env_bool("MG_MONTH_BUCKETS", false),
            },
            cors: CorsConfig {
                allowed_origins,
                fallback_origin: env_or("MG_FALLBACK_ORIGIN", "http://localhost:8888"),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size_bytes() {
        assert_eq!(parse_size("4096").unwrap(), 4096);
        assert_eq!(parse_size("0").unwrap(), 0);
    }

    #[test]
    fn test_parse_size_kb() {
        assert_eq!(parse_size("1KB").unwrap(), 1024);
        assert_eq!(parse_size("512k").unwrap(), 512 * 1024);
    }

    #[test]
    fn test_parse_size_mb() {
        assert_eq!(parse_size("8MB").unwrap(), 8 * 1024 * 1024);
        assert_eq!(parse_size("8m").unwrap(), 8 * 1024 * 1024);
    }

    #[test]
    fn test_parse_size_gb() {
        assert_eq!(parse_size("1GB").unwrap(), 1024 * 1024 * 1024);
    }

    #[test]
    fn test_parse_size_invalid() {
        assert!(parse_size("").is_err());
        assert!(parse_size("abc").is_err());
        assert!(parse_size("1TB").is_err());
    }
}
