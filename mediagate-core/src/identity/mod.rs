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

//! Identity token verification.
//!
//! Verifies an opaque bearer credential against the issuer's remote
//! public-key set and extracts a stable subject identifier. Every call
//! is a fresh verification; the only shared state is the process-wide
//! key cache, which is read-mostly and refreshed on a `kid` miss.

pub mod jwks;
pub mod verifier;

pub use jwks::{HttpKeyProvider, Jwk, KeyCache, KeyProvider};
pub use verifier::{IdentityClaim, IdentityVerifier, VerifyOptions};
