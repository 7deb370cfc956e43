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

//! Quota gate: the allow/deny decision before minting a credential.
//!
//! The gate is side-effect-free and reserves no capacity, so
//! check-then-mint is a read-then-act race: two concurrent requests
//! from the same user can both observe `used = limit - 1` and both be
//! admitted, overshooting by up to the number of concurrent requests
//! minus one. This is a known property of the design, kept as-is. The
//! fix, if ever wanted, is an atomic conditional increment against a
//! persistent counter in the record store, not extra reads here.

use crate::namespace::Namespace;
use crate::store::MediaStore;
use crate::usage::count_usage;

/// Outcome of a quota check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaDecision {
    /// Whether a credential may be minted.
    pub allowed: bool,
    /// Usage snapshot at decision time. Counting stops once the total
    /// reaches `limit`, but the final page is taken whole, so this can
    /// exceed `limit` by up to one page.
    pub used: u32,
    /// Configured limit.
    pub limit: u32,
}

/// Decides whether the caller may write another object under
/// `namespace`. Usage is counted with `hard_cap = limit`; ties
/// (`used == limit`) deny.
pub async fn admit(
    store: &dyn MediaStore,
    namespace: &Namespace,
    limit: u32,
    page_size: usize,
) -> QuotaDecision {
    let used = count_usage(store, namespace, page_size, limit).await;
    QuotaDecision {
        allowed: used < limit,
        used,
        limit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::store::{MediaFile, UploadRequest};
    use async_trait::async_trait;

    /// Serves exactly `n` objects under any prefix.
    struct FixedStore(usize);

    #[async_trait]
    impl crate::store::MediaStore for FixedStore {
        async fn list_files(
            &self,
            _prefix: &str,
            limit: usize,
            skip: usize,
        ) -> Result<Vec<MediaFile>, CoreError> {
            Ok((skip..self.0.min(skip + limit))
                .map(|n| MediaFile {
                    file_id: format!("f{n}"),
                    name: format!("{n}.jpg"),
                    path: format!("users/u1/images/{n}.jpg"),
                    url: String::new(),
                    thumbnail_url: None,
                    size: 1,
                    mime_type: None,
                    created_at: None,
                })
                .collect())
        }

        async fn file_details(&self, _file_id: &str) -> Result<MediaFile, CoreError> {
            unreachable!()
        }

        async fn upload(&self, _request: UploadRequest) -> Result<MediaFile, CoreError> {
            unreachable!()
        }

        async fn delete_file(&self, _file_id: &str) -> Result<(), CoreError> {
            unreachable!()
        }
    }

    #[tokio::test]
    async fn test_under_limit_is_allowed() {
        let ns = Namespace::for_subject("u1");
        let decision = admit(&FixedStore(4), &ns, 5, 100).await;
        assert!(decision.allowed);
        assert_eq!(decision.used, 4);
        assert_eq!(decision.limit, 5);
    }

    #[tokio::test]
    async fn test_at_limit_is_denied() {
        let ns = Namespace::for_subject("u1");
        let decision = admit(&FixedStore(5), &ns, 5, 100).await;
        assert!(!decision.allowed);
        assert_eq!(decision.used, 5);
    }

    #[tokio::test]
    async fn test_over_limit_is_denied() {
        let ns = Namespace::for_subject("u1");
        let decision = admit(&FixedStore(6), &ns, 5, 100).await;
        assert!(!decision.allowed);
        // One page of 100 returns all 6 before the cap check applies.
        assert_eq!(decision.used, 6);
    }

    #[tokio::test]
    async fn test_zero_limit_always_denies() {
        let ns = Namespace::for_subject("u1");
        let decision = admit(&FixedStore(0), &ns, 0, 100).await;
        assert!(!decision.allowed);
        assert_eq!(decision.used, 0);
    }
}
