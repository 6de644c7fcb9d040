//! Run list cursor movement.
//!
//! Scrolling follows the cursor so the selected run stays in the visible
//! window.

use bubbletea_rs::Cmd;

use super::CompareApp;

impl CompareApp {
    /// Adjusts the scroll offset so the cursor remains within the viewport.
    pub(super) const fn ensure_cursor_visible(&mut self) {
        let visible_height = self.run_list.visible_height();

        if self.cursor_position < self.scroll_offset {
            self.scroll_offset = self.cursor_position;
            return;
        }

        let viewport_end = self.scroll_offset.saturating_add(visible_height);
        if self.cursor_position >= viewport_end {
            self.scroll_offset = self
                .cursor_position
                .saturating_sub(visible_height.saturating_sub(1));
        }
    }

    fn set_cursor(&mut self, position: usize) {
        self.cursor_position = position.min(self.runs.len().saturating_sub(1));
        self.ensure_cursor_visible();
    }

    pub(super) fn handle_cursor_up(&mut self) -> Option<Cmd> {
        self.set_cursor(self.cursor_position.saturating_sub(1));
        None
    }

    pub(super) fn handle_cursor_down(&mut self) -> Option<Cmd> {
        self.set_cursor(self.cursor_position.saturating_add(1));
        None
    }

    pub(super) fn handle_home(&mut self) -> Option<Cmd> {
        self.scroll_offset = 0;
        self.set_cursor(0);
        None
    }

    pub(super) fn handle_end(&mut self) -> Option<Cmd> {
        self.set_cursor(self.runs.len().saturating_sub(1));
        None
    }
}
