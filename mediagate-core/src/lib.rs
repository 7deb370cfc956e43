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

//! Mediagate domain core.
//!
//! The quota-gated upload authorization protocol, free of HTTP framing:
//! identity verification, namespace resolution, usage counting, quota
//! gating, credential minting, and ownership-checked mutation. The HTTP
//! surface in `mediagate-api` is a thin adapter over these modules.

pub mod clients;
pub mod credential;
pub mod error;
pub mod identity;
pub mod namespace;
pub mod ownership;
pub mod quota;
pub mod store;
pub mod usage;

pub use credential::UploadCredential;
pub use error::CoreError;
pub use identity::{IdentityClaim, IdentityVerifier, VerifyOptions};
pub use namespace::{Namespace, ResourceType};
pub use quota::QuotaDecision;
pub use store::{MediaFile, MediaRecord, MediaStore, RecordPatch, RecordStore};
