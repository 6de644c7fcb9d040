//! Session-scoped cache of media bodies.
//!
//! Each test identifier is fetched at most once. A failed fetch is remembered
//! so it is never retried; callers render it the same as a pending one.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::catalog::error::CatalogError;
use crate::catalog::models::{MediaBody, TestId};

/// Fetch state of one media body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaState {
    /// A fetch has been issued and not completed.
    Pending,
    /// The body is available.
    Ready(MediaBody),
    /// The fetch failed; it stays in the loading state for display.
    Failed,
}

impl MediaState {
    /// Whether the body should be shown as still loading.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        !matches!(self, Self::Ready(_))
    }

    /// Returns the body once available.
    #[must_use]
    pub const fn body(&self) -> Option<&MediaBody> {
        match self {
            Self::Ready(body) => Some(body),
            Self::Pending | Self::Failed => None,
        }
    }
}

/// Keyed fetch-once cache of media bodies.
#[derive(Debug, Clone, Default)]
pub struct MediaCache {
    entries: HashMap<TestId, MediaState>,
}

impl MediaCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records interest in `test_id`.
    ///
    /// Returns `true` when the caller should issue the fetch, which happens
    /// only the first time an identifier is requested.
    pub fn begin(&mut self, test_id: &TestId) -> bool {
        match self.entries.entry(test_id.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(MediaState::Pending);
                true
            }
        }
    }

    /// Stores the result of a fetch issued after [`MediaCache::begin`].
    pub fn complete(&mut self, test_id: &TestId, result: Result<MediaBody, CatalogError>) {
        let state = match result {
            Ok(body) => {
                tracing::debug!(%test_id, bytes = body.len(), "media body cached");
                MediaState::Ready(body)
            }
            Err(error) => {
                tracing::warn!(%test_id, %error, "media fetch failed");
                MediaState::Failed
            }
        };
        self.entries.insert(test_id.clone(), state);
    }

    /// Returns the state of `test_id`, if it was ever requested.
    #[must_use]
    pub fn state(&self, test_id: &TestId) -> Option<&MediaState> {
        self.entries.get(test_id)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn first_request_issues_a_fetch_and_later_ones_do_not() {
        let mut cache = MediaCache::new();
        let test_id = TestId::new("t-1");

        assert!(cache.begin(&test_id));
        assert!(!cache.begin(&test_id));
        assert_eq!(cache.state(&test_id), Some(&MediaState::Pending));
    }

    #[rstest]
    fn completed_body_is_served_from_cache() {
        let mut cache = MediaCache::new();
        let test_id = TestId::new("t-1");
        cache.begin(&test_id);

        cache.complete(&test_id, Ok(MediaBody::new("data:image/png;base64,AAAA")));

        let state = cache.state(&test_id).expect("state");
        assert!(!state.is_loading());
        assert_eq!(state.body().and_then(MediaBody::mime_type), Some("image/png"));
        assert!(!cache.begin(&test_id));
    }

    #[rstest]
    fn failed_fetch_stays_loading_and_is_not_retried() {
        let mut cache = MediaCache::new();
        let test_id = TestId::new("t-1");
        cache.begin(&test_id);

        cache.complete(
            &test_id,
            Err(CatalogError::MediaNotFound {
                test_id: "t-1".to_owned(),
            }),
        );

        assert!(cache.state(&test_id).is_some_and(MediaState::is_loading));
        assert!(!cache.begin(&test_id));
    }
}
