//! Media placeholder focus, the media modal, and body fetches.

use std::any::Any;
use std::sync::Arc;

use bubbletea_rs::Cmd;

use super::CompareApp;
use crate::catalog::MediaSource;
use crate::catalog::error::CatalogError;
use crate::catalog::models::{MediaBody, TestId};
use crate::tui::components::media_placeholders;
use crate::tui::messages::AppMsg;

impl CompareApp {
    /// Keeps media focus on an existing placeholder after panels change.
    pub(super) fn clamp_media_focus(&mut self) {
        let count = media_placeholders(&self.session).len();
        self.media_focus = self
            .media_focus
            .filter(|_| count > 0)
            .map(|index| index.min(count.saturating_sub(1)));
    }

    pub(super) fn handle_next_media(&mut self) -> Option<Cmd> {
        let count = media_placeholders(&self.session).len();
        if count == 0 {
            self.media_focus = None;
            return None;
        }
        let next = self
            .media_focus
            .map_or(0, |index| index.saturating_add(1).rem_euclid(count));
        self.media_focus = Some(next);
        None
    }

    pub(super) fn handle_previous_media(&mut self) -> Option<Cmd> {
        let count = media_placeholders(&self.session).len();
        if count == 0 {
            self.media_focus = None;
            return None;
        }
        let last = count.saturating_sub(1);
        let previous = match self.media_focus {
            Some(0) | None => last,
            Some(index) => index.saturating_sub(1),
        };
        self.media_focus = Some(previous);
        None
    }

    /// Opens the modal for the focused placeholder, fetching its body the
    /// first time it is opened in this session.
    pub(super) fn handle_open_media(&mut self) -> Option<Cmd> {
        let placeholders = media_placeholders(&self.session);
        let placeholder = self
            .media_focus
            .and_then(|index| placeholders.get(index))?
            .clone();
        let test_id = placeholder.test_id.clone();
        self.media_modal = Some(placeholder);

        if !self.session.request_media(&test_id) {
            return None;
        }
        let Some(source) = self.media_source.clone() else {
            tracing::debug!(%test_id, "no media source configured");
            return None;
        };
        tracing::debug!(%test_id, "media fetch issued");
        Some(spawn_media_fetch(source, test_id))
    }

    pub(super) fn handle_media_loaded(
        &mut self,
        test_id: &TestId,
        result: Result<MediaBody, CatalogError>,
    ) -> Option<Cmd> {
        self.session.complete_media(test_id, result);
        None
    }

    /// Closes the modal, or drops media focus when no modal is open.
    pub(super) fn handle_escape(&mut self) -> Option<Cmd> {
        if self.media_modal.take().is_none() {
            self.media_focus = None;
        }
        None
    }
}

fn spawn_media_fetch(source: Arc<dyn MediaSource>, test_id: TestId) -> Cmd {
    Box::pin(async move {
        let result = source.fetch_media_body(&test_id).await;
        Some(Box::new(AppMsg::MediaLoaded { test_id, result }) as Box<dyn Any + Send>)
    })
}
