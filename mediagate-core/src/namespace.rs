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

//! Per-user storage namespace derivation.
//!
//! A namespace is a deterministic slash-delimited path prefix scoping
//! one subject's objects. Derivation is a pure function of the subject,
//! the resource type, and (for monthly bucketing) the clock; nothing
//! here performs I/O and namespaces are never persisted.

use chrono::{DateTime, Datelike, Utc};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Kind of media object a namespace holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    /// User-uploaded image.
    Image,
    /// Thumbnail for an externally hosted video.
    VideoThumb,
}

impl ResourceType {
    /// Path segment used inside a namespace.
    pub fn segment(&self) -> &'static str {
        match self {
            ResourceType::Image => "images",
            ResourceType::VideoThumb => "thumbs",
        }
    }

    /// Record-store collection name for this type.
    pub fn collection(&self) -> &'static str {
        match self {
            ResourceType::Image => "media_images",
            ResourceType::VideoThumb => "media_videos",
        }
    }
}

impl FromStr for ResourceType {
    type Err = CoreError;

    /// Parses the wire selector. Anything outside the enumerated set is
    /// rejected rather than silently defaulted, to prevent namespace
    /// confusion.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(ResourceType::Image),
            "video-thumb" => Ok(ResourceType::VideoThumb),
            other => Err(CoreError::InvalidResourceType(other.to_string())),
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceType::Image => write!(f, "image"),
            ResourceType::VideoThumb => write!(f, "video-thumb"),
        }
    }
}

/// A derived storage path prefix for one subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace(String);

impl Namespace {
    /// Flat default namespace: `users/<subject>`.
    pub fn for_subject(subject: &str) -> Self {
        Namespace(format!("users/{subject}"))
    }

    /// Type-scoped namespace: `users/<subject>/<segment>`.
    pub fn for_type(subject: &str, resource_type: ResourceType) -> Self {
        Namespace(format!("users/{subject}/{}", resource_type.segment()))
    }

    /// Fully bucketed namespace:
    /// `users/<subject>/<segment>/<year>/<zero-padded month>`.
    pub fn for_resource(subject: &str, resource_type: ResourceType, clock: DateTime<Utc>) -> Self {
        Namespace(format!(
            "users/{subject}/{}/{}/{:02}",
            resource_type.segment(),
            clock.year(),
            clock.month()
        ))
    }

    /// The namespace as a path string (no leading or trailing separator).
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks whether `path` lies inside this namespace.
    ///
    /// Exact-prefix match at a path boundary: the path must equal the
    /// namespace or continue with a separator, so `users/abc` never
    /// claims `users/abcdef/...`. Leading separators on the fetched
    /// path are stripped before comparison; client-supplied paths must
    /// never reach this check.
    pub fn owns(&self, path: &str) -> bool {
        let normalized = path.trim_start_matches('/');
        normalized == self.0
            || (normalized.starts_with(&self.0)
                && normalized.as_bytes().get(self.0.len()) == Some(&b'/'))
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_resource_type_parsing() {
        assert_eq!("image".parse::<ResourceType>().unwrap(), ResourceType::Image);
        assert_eq!(
            "video-thumb".parse::<ResourceType>().unwrap(),
            ResourceType::VideoThumb
        );
        assert!(matches!(
            "gif".parse::<ResourceType>(),
            Err(CoreError::InvalidResourceType(_))
        ));
        // No silent defaulting for near-misses either.
        assert!("images".parse::<ResourceType>().is_err());
        assert!("".parse::<ResourceType>().is_err());
    }

    #[test]
    fn test_flat_namespace() {
        assert_eq!(Namespace::for_subject("alice").as_str(), "users/alice");
    }

    #[test]
    fn test_bucketed_namespace_is_deterministic() {
        let t = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let a = Namespace::for_resource("alice", ResourceType::Image, t);
        let b = Namespace::for_resource("alice", ResourceType::Image, t);
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "users/alice/images/2024/03");
    }

    #[test]
    fn test_month_is_zero_padded() {
        let t = Utc.with_ymd_and_hms(2026, 11, 1, 0, 0, 0).unwrap();
        let ns = Namespace::for_resource("u", ResourceType::VideoThumb, t);
        assert_eq!(ns.as_str(), "users/u/thumbs/2026/11");
        let t = Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap();
        let ns = Namespace::for_resource("u", ResourceType::VideoThumb, t);
        assert_eq!(ns.as_str(), "users/u/thumbs/2026/08");
    }

    #[test]
    fn test_distinct_subjects_never_overlap() {
        let t = Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap();
        let alice = Namespace::for_resource("alice", ResourceType::Image, t);
        let alice2 = Namespace::for_resource("alice2", ResourceType::Image, t);
        assert!(!alice.owns(alice2.as_str()));
        assert!(!alice2.owns(alice.as_str()));
    }

    #[test]
    fn test_ownership_boundary() {
        let ns = Namespace::for_subject("alice");
        assert!(ns.owns("users/alice/images/1.jpg"));
        assert!(ns.owns("/users/alice/images/1.jpg"));
        assert!(ns.owns("users/alice"));

        // Prefix-but-not-boundary must be rejected.
        let ali = Namespace::for_subject("ali");
        assert!(!ali.owns("users/alice/images/1.jpg"));

        let bob = Namespace::for_subject("bob");
        assert!(!bob.owns("users/alice/images/1.jpg"));
    }
}
