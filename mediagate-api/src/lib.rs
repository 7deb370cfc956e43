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

//! Mediagate HTTP API.
//!
//! Thin axum adapters over the `mediagate-core` flows: each handler
//! composes identity verification (middleware), namespace resolution,
//! and one core operation, then shapes a JSON response.

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod server;

pub use server::{
    create_router, AppState, CorsSettings, CredentialSettings, QuotaSettings, Settings,
};
