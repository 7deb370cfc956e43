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

//! Error types for the authorization core.
//!
//! Messages stay deliberately generic: responses built from these
//! errors must never reveal which upstream check failed or name a
//! collaborator vendor.

use thiserror::Error;

/// Errors that can occur in the authorization core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// No bearer token was supplied.
    #[error("Missing credential")]
    MissingToken,

    /// No expected audience is configured; verification fails closed.
    #[error("Verification is not configured")]
    MissingAudience,

    /// Token failed verification (signature, issuer, audience, expiry,
    /// shape, or missing subject claim).
    #[error("Unable to verify credential")]
    InvalidToken,

    /// Resource type selector outside the enumerated set.
    #[error("Unknown resource type: {0}")]
    InvalidResourceType(String),

    /// Per-user storage quota reached.
    #[error("Upload limit reached")]
    QuotaExceeded {
        /// Objects currently counted under the namespace.
        used: u32,
        /// Configured limit.
        limit: u32,
    },

    /// Resource exists but lies outside the caller's namespace.
    #[error("Not your file")]
    Forbidden,

    /// Resource does not exist.
    #[error("Item not found")]
    NotFound,

    /// Collaborator I/O failure during a mutation or verification.
    #[error("Upstream service unavailable")]
    Upstream(String),

    /// Malformed request body or missing required field.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl CoreError {
    /// Stable kebab-case kind, used as the `error` field of response bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            CoreError::MissingToken => "missing-token",
            CoreError::MissingAudience => "missing-audience",
            CoreError::InvalidToken => "invalid-token",
            CoreError::InvalidResourceType(_) => "invalid-type",
            CoreError::QuotaExceeded { .. } => "quota-exceeded",
            CoreError::Forbidden => "forbidden",
            CoreError::NotFound => "not-found",
            CoreError::Upstream(_) => "upstream-unavailable",
            CoreError::InvalidRequest(_) => "invalid-request",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(CoreError::MissingToken.kind(), "missing-token");
        assert_eq!(
            CoreError::QuotaExceeded { used: 5, limit: 5 }.kind(),
            "quota-exceeded"
        );
        assert_eq!(CoreError::Forbidden.kind(), "forbidden");
    }

    #[test]
    fn test_messages_are_generic() {
        // Response text must not leak collaborator details.
        let msg = CoreError::InvalidToken.to_string();
        assert!(!msg.to_lowercase().contains("signature"));
        assert!(!msg.to_lowercase().contains("issuer"));
    }
}
