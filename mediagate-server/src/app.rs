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

//! Application initialization and runtime.
//!
//! Wires the HTTP collaborator clients into the router state, binds
//! the listener, and handles graceful shutdown.

use crate::config::Config;
use anyhow::Result;
use mediagate_api::{
    create_router, AppState, CorsSettings, CredentialSettings, QuotaSettings, Settings,
};
use mediagate_core::clients::{HttpMediaHost, HttpRecordStore};
use mediagate_core::identity::{HttpKeyProvider, IdentityVerifier};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Main application.
pub struct App {
    config: Config,
}

impl App {
    /// Creates a new application instance.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the HTTP server until a shutdown signal arrives.
    pub async fn run(self) -> Result<()> {
        let config = self.config;

        if config.identity.allow_emulator_bypass {
            warn!("emulator bypass enabled; unsigned tokens accepted from loopback callers");
        }

        let key_provider = match &config.identity.jwks_url {
            Some(url) => HttpKeyProvider::with_url(url),
            None => HttpKeyProvider::new(),
        };
        let verifier = Arc::new(IdentityVerifier::new(
            config.identity.project_id.clone(),
            Arc::new(key_provider),
        ));

        let media = Arc::new(HttpMediaHost::new(
            &config.media_host.api_url,
            &config.media_host.private_key,
        ));
        let records = Arc::new(HttpRecordStore::new(&config.records.api_url));

        let settings = Settings {
            quota: QuotaSettings {
                image_limit: config.quota.image_limit,
                video_thumb_limit: config.quota.video_thumb_limit,
                page_size: config.quota.page_size,
            },
            credential: CredentialSettings {
                ttl_seconds: config.credential.ttl_seconds,
                signing_key: config.media_host.private_key.clone(),
                public_key: config.media_host.public_key.clone(),
                url_endpoint: config.media_host.url_endpoint.clone(),
            },
            cors: CorsSettings {
                allowed_origins: config.cors.allowed_origins.clone(),
                fallback_origin: config.cors.fallback_origin.clone(),
            },
            allow_emulator_bypass: config.identity.allow_emulator_bypass,
            month_buckets: config.credential.month_buckets,
            max_upload_size: config.server.max_upload_size,
        };

        let state = AppState {
            verifier,
            media,
            records,
            settings: Arc::new(settings),
        };

        let addr: SocketAddr = config.server.bind.parse()?;
        let router = create_router(state);

        info!("Listening on http://{}", addr);
        run_http_server(addr, router).await
    }
}

/// Runs the HTTP server with graceful shutdown.
async fn run_http_server(addr: SocketAddr, router: axum::Router) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;

    // ConnectInfo feeds the loopback check behind the emulator bypass.
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Handles graceful shutdown signals.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown...");
        }
    }
}
