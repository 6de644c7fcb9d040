//! Main TUI application model implementing the MVU pattern.
//!
//! This module provides the application state and update logic for the run
//! comparison TUI. It owns the [`ComparisonSession`], routes key presses to
//! slot toggles, and issues tree and media fetches as async commands.
//!
//! # Module Structure
//!
//! - `navigation`: Run list cursor movement
//! - `selection_handlers`: Slot toggles and resolution settlement
//! - `media_handlers`: Media placeholder focus, modal, and fetches
//! - `rendering`: View rendering methods for terminal output

use std::fmt;
use std::sync::Arc;

use bubbletea_rs::Cmd;

use crate::catalog::models::{Run, TestId};
use crate::catalog::{MediaSource, RunCatalog};
use crate::compare::ComparisonSession;
use crate::telemetry::TelemetrySink;

use super::components::{
    MediaModalComponent, MediaPlaceholder, RunListComponent, ScenarioPanelComponent,
};
use super::messages::AppMsg;

mod media_handlers;
mod model_impl;
mod navigation;
mod rendering;
mod selection_handlers;

/// Rows reserved for the header, the list/panel separator, and the status bar.
const CHROME_HEIGHT: u16 = 4;

/// Main application model for the run comparison TUI.
pub struct CompareApp {
    /// Runs offered for comparison, in display order.
    pub(crate) runs: Vec<Run>,
    /// Index of the run the toggle keys act on.
    pub(crate) cursor_position: usize,
    /// Index of the first visible run.
    pub(crate) scroll_offset: usize,
    /// Slot state and selection for the target test.
    pub(crate) session: ComparisonSession,
    /// Catalog resolutions are fetched from.
    catalog: Option<Arc<dyn RunCatalog>>,
    /// Source media bodies are fetched from.
    media_source: Option<Arc<dyn MediaSource>>,
    /// Resolutions issued and not yet settled.
    pub(crate) in_flight: usize,
    /// Focused media placeholder across both panels.
    pub(crate) media_focus: Option<usize>,
    /// Placeholder whose modal is open.
    pub(crate) media_modal: Option<MediaPlaceholder>,
    /// Terminal dimensions.
    width: u16,
    height: u16,
    /// Whether help overlay is visible.
    pub(crate) show_help: bool,
    run_list: RunListComponent,
    panel: ScenarioPanelComponent,
    modal: MediaModalComponent,
}

impl fmt::Debug for CompareApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompareApp")
            .field("runs", &self.runs.len())
            .field("cursor_position", &self.cursor_position)
            .field("session", &self.session)
            .field("in_flight", &self.in_flight)
            .field("media_focus", &self.media_focus)
            .field("media_modal", &self.media_modal)
            .field("show_help", &self.show_help)
            .finish_non_exhaustive()
    }
}

impl CompareApp {
    /// Creates an application comparing runs of `target`.
    ///
    /// Without a catalog, toggles mark membership but never resolve.
    #[must_use]
    pub fn new(runs: Vec<Run>, target: TestId) -> Self {
        let mut app = Self {
            runs,
            cursor_position: 0,
            scroll_offset: 0,
            session: ComparisonSession::new(target),
            catalog: None,
            media_source: None,
            in_flight: 0,
            media_focus: None,
            media_modal: None,
            width: 80,
            height: 24,
            show_help: false,
            run_list: RunListComponent::new(),
            panel: ScenarioPanelComponent::new(),
            modal: MediaModalComponent::new(),
        };
        app.run_list.set_visible_height(list_height_for(app.height));
        app
    }

    /// Sets the catalog run trees are fetched from.
    #[must_use]
    pub fn with_catalog(mut self, catalog: Arc<dyn RunCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Sets the source media bodies are fetched from.
    #[must_use]
    pub fn with_media_source(mut self, media_source: Arc<dyn MediaSource>) -> Self {
        self.media_source = Some(media_source);
        self
    }

    /// Routes settlement and media telemetry to `sink`.
    #[must_use]
    pub fn with_telemetry(mut self, sink: Arc<dyn TelemetrySink>) -> Self {
        self.session = self.session.with_telemetry(sink);
        self
    }

    /// The comparison session.
    #[must_use]
    pub const fn session(&self) -> &ComparisonSession {
        &self.session
    }

    /// Returns the current cursor position.
    #[must_use]
    pub const fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    /// Returns the run under the cursor, if any.
    #[must_use]
    pub fn selected_run(&self) -> Option<&Run> {
        self.runs.get(self.cursor_position)
    }

    /// Returns whether any resolution is still in flight.
    #[must_use]
    pub const fn is_resolving(&self) -> bool {
        self.in_flight > 0
    }

    /// Handles a message and updates state accordingly.
    ///
    /// Delegates to specialised handlers for each message category.
    pub fn handle_message(&mut self, msg: &AppMsg) -> Option<Cmd> {
        if msg.is_navigation() {
            return self.handle_navigation_msg(msg);
        }
        if msg.is_selection() {
            return self.handle_selection_msg(msg);
        }
        if msg.is_media() {
            return self.handle_media_msg(msg);
        }
        self.handle_lifecycle_msg(msg)
    }

    fn handle_navigation_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::CursorUp => self.handle_cursor_up(),
            AppMsg::CursorDown => self.handle_cursor_down(),
            AppMsg::Home => self.handle_home(),
            AppMsg::End => self.handle_end(),
            _ => {
                debug_assert!(
                    false,
                    "non-navigation message routed to handle_navigation_msg"
                );
                None
            }
        }
    }

    fn handle_selection_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::ToggleSlot(slot) => self.handle_toggle_slot(*slot),
            AppMsg::ResolutionSettled(settled) => self.handle_resolution_settled(settled),
            _ => {
                debug_assert!(false, "non-selection message routed to handle_selection_msg");
                None
            }
        }
    }

    fn handle_media_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::NextMedia => self.handle_next_media(),
            AppMsg::PreviousMedia => self.handle_previous_media(),
            AppMsg::OpenMedia => self.handle_open_media(),
            AppMsg::MediaLoaded { test_id, result } => {
                self.handle_media_loaded(test_id, result.clone())
            }
            AppMsg::EscapePressed => self.handle_escape(),
            _ => {
                debug_assert!(false, "non-media message routed to handle_media_msg");
                None
            }
        }
    }

    fn handle_lifecycle_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::Quit => Some(bubbletea_rs::quit()),
            AppMsg::ToggleHelp => {
                self.show_help = !self.show_help;
                None
            }
            AppMsg::WindowResized { width, height } => self.handle_resize(*width, *height),
            _ => {
                debug_assert!(
                    false,
                    "non-lifecycle message routed to handle_lifecycle_msg"
                );
                None
            }
        }
    }

    fn handle_resize(&mut self, width: u16, height: u16) -> Option<Cmd> {
        self.width = width;
        self.height = height;
        self.run_list.set_visible_height(list_height_for(height));
        self.ensure_cursor_visible();
        None
    }
}

/// The run list takes a third of the space left by the chrome.
fn list_height_for(height: u16) -> usize {
    usize::from(height.saturating_sub(CHROME_HEIGHT))
        .div_euclid(3)
        .max(1)
}
