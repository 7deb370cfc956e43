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

//! Usage counting against the media host's listing API.
//!
//! The count is an advisory snapshot, not an authoritative counter:
//! the listing API is eventually consistent and the quota gate built
//! on top of it is read-then-decide (see [`crate::quota`]).

use tracing::warn;

use crate::namespace::Namespace;
use crate::store::MediaStore;

/// Counts objects under `namespace`, capped at `hard_cap`.
///
/// Issues paginated listing calls and accumulates a running total,
/// stopping as soon as the total reaches `hard_cap` (only at-or-over
/// the limit matters to callers) or a page comes back short (end of
/// listing).
///
/// Any collaborator error yields 0 rather than propagating: a fresh
/// user whose folder does not exist yet must never be blocked by a
/// listing failure. The flip side is that a flaky listing API fails
/// open; callers treating this count as authoritative would be wrong.
pub async fn count_usage(
    store: &dyn MediaStore,
    namespace: &Namespace,
    page_size: usize,
    hard_cap: u32,
) -> u32 {
    if page_size == 0 || hard_cap == 0 {
        return 0;
    }

    let mut count: u32 = 0;
    let mut skip = 0usize;

    loop {
        let page = match store.list_files(namespace.as_str(), page_size, skip).await {
            Ok(page) => page,
            Err(e) => {
                warn!(namespace = %namespace, error = %e, "listing failed, treating usage as zero");
                return 0;
            }
        };

        count = count.saturating_add(page.len() as u32);
        if count >= hard_cap || page.len() < page_size {
            break;
        }
        skip += page_size;
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::store::{MediaFile, UploadRequest};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn file(n: usize) -> MediaFile {
        MediaFile {
            file_id: format!("f{n}"),
            name: format!("{n}.jpg"),
            path: format!("users/u1/images/{n}.jpg"),
            url: format!("https://cdn.example.com/{n}.jpg"),
            thumbnail_url: None,
            size: 1,
            mime_type: None,
            created_at: None,
        }
    }

    /// Fixed set of files served in stable name order, page by page.
    struct PagedStore {
        total: usize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl MediaStore for PagedStore {
        async fn list_files(
            &self,
            _prefix: &str,
            limit: usize,
            skip: usize,
        ) -> Result<Vec<MediaFile>, CoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok((skip..self.total.min(skip + limit)).map(file).collect())
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

    struct FailingStore;

    #[async_trait]
    impl MediaStore for FailingStore {
        async fn list_files(
            &self,
            _prefix: &str,
            _limit: usize,
            _skip: usize,
        ) -> Result<Vec<MediaFile>, CoreError> {
            Err(CoreError::Upstream("listing unavailable".to_string()))
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
    async fn test_counts_across_pages_without_double_counting() {
        let store = PagedStore {
            total: 7,
            calls: AtomicUsize::new(0),
        };
        let ns = Namespace::for_subject("u1");
        assert_eq!(count_usage(&store, &ns, 3, 100).await, 7);
        // 3 + 3 + 1: the short final page ends the walk.
        assert_eq!(store.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_stops_early_at_hard_cap() {
        let store = PagedStore {
            total: 1000,
            calls: AtomicUsize::new(0),
        };
        let ns = Namespace::for_subject("u1");
        assert_eq!(count_usage(&store, &ns, 100, 5).await, 100);
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_listing_error_counts_as_zero() {
        let ns = Namespace::for_subject("fresh-user");
        assert_eq!(count_usage(&FailingStore, &ns, 100, 5).await, 0);
    }

    #[tokio::test]
    async fn test_idempotent_without_intervening_writes() {
        let store = PagedStore {
            total: 4,
            calls: AtomicUsize::new(0),
        };
        let ns = Namespace::for_subject("u1");
        let first = count_usage(&store, &ns, 100, 5).await;
        let second = count_usage(&store, &ns, 100, 5).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_zero_page_size_is_harmless() {
        let store = PagedStore {
            total: 4,
            calls: AtomicUsize::new(0),
        };
        let ns = Namespace::for_subject("u1");
        assert_eq!(count_usage(&store, &ns, 0, 5).await, 0);
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }
}
