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

//! Short-lived signed upload credentials.
//!
//! The downstream upload host validates the signature independently,
//! so the signed message layout and digest are a compatibility
//! contract: HMAC-SHA1 over the UTF-8 bytes of `token` immediately
//! followed by the decimal expiry timestamp, hex-encoded. Changing
//! either side breaks uploads.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use rand::RngCore;
use serde::Serialize;
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// A one-shot credential authorizing a single direct client-to-storage
/// write. Enforcement of single use is the upload host's job.
#[derive(Debug, Clone, Serialize)]
pub struct UploadCredential {
    /// Random 16-byte token, hex-encoded.
    pub token: String,
    /// Unix expiry timestamp, strictly in the future at issuance and
    /// never extended.
    pub expire: i64,
    /// Hex HMAC-SHA1 over `token || decimal(expire)`.
    pub signature: String,
}

/// Mints a credential valid for `ttl_seconds` from `now`.
///
/// The signing secret is used only to key the MAC; it is never logged,
/// returned, or embedded in the credential.
pub fn mint(ttl_seconds: i64, signing_secret: &[u8], now: DateTime<Utc>) -> UploadCredential {
    let mut raw = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut raw);
    let token = hex::encode(raw);
    let expire = now.timestamp() + ttl_seconds;
    let signature = sign(&token, expire, signing_secret);

    UploadCredential {
        token,
        expire,
        signature,
    }
}

/// Computes the credential signature for a given token and expiry.
///
/// Deterministic: the same inputs always reproduce the identical hex
/// digest, which is how the upload host validates it.
pub fn sign(token: &str, expire: i64, signing_secret: &[u8]) -> String {
    // HMAC accepts keys of any length.
    let mut mac = HmacSha1::new_from_slice(signing_secret).expect("hmac key of any length");
    mac.update(token.as_bytes());
    mac.update(expire.to_string().as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_token_is_16_random_bytes_hex() {
        let now = Utc::now();
        let a = mint(60, b"secret", now);
        let b = mint(60, b"secret", now);
        assert_eq!(a.token.len(), 32);
        assert!(a.token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a.token, b.token);
    }

    #[test]
    fn test_expiry_is_issuance_plus_ttl() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let cred = mint(60, b"secret", now);
        assert_eq!(cred.expire, now.timestamp() + 60);
    }

    #[test]
    fn test_signature_is_deterministic() {
        let a = sign("aabbcc", 1700000000, b"private-key");
        let b = sign("aabbcc", 1700000000, b"private-key");
        assert_eq!(a, b);

        // Recompute the keyed hash externally over the exact message
        // bytes the contract specifies.
        let mut mac = HmacSha1::new_from_slice(b"private-key").unwrap();
        mac.update(b"aabbcc1700000000");
        assert_eq!(a, hex::encode(mac.finalize().into_bytes()));
    }

    #[test]
    fn test_signature_depends_on_every_input() {
        let base = sign("aabbcc", 1700000000, b"k1");
        assert_ne!(base, sign("aabbcd", 1700000000, b"k1"));
        assert_ne!(base, sign("aabbcc", 1700000001, b"k1"));
        assert_ne!(base, sign("aabbcc", 1700000000, b"k2"));
    }

    #[test]
    fn test_minted_signature_verifies() {
        let now = Utc::now();
        let cred = mint(300, b"private-key", now);
        assert_eq!(cred.signature, sign(&cred.token, cred.expire, b"private-key"));
    }
}
