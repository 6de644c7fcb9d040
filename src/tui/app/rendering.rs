//! Rendering logic for the comparison TUI application.
//!
//! These are pure query methods that read state without modification.

use super::{CHROME_HEIGHT, CompareApp};
use crate::compare::SlotIndex;
use crate::tui::components::layout::{fit_to_width, side_by_side, truncate_lines};
use crate::tui::components::{
    MediaModalViewContext, MediaPlaceholder, RunListViewContext, ScenarioPanelViewContext,
    media_placeholders,
};

const COLUMN_GAP: usize = 3;

impl CompareApp {
    /// Renders the title and target lines.
    pub(super) fn render_header(&self) -> String {
        let title = "runcompare - Compare Runs";
        let resolving = if self.is_resolving() {
            " [Resolving...]"
        } else {
            ""
        };
        let count = self.runs.len();
        let noun = if count == 1 { "run" } else { "runs" };
        format!(
            "{title}{resolving}\nTest: {} ({count} {noun})\n",
            self.session.target()
        )
    }

    pub(super) fn render_run_list(&self) -> String {
        let ctx = RunListViewContext {
            runs: &self.runs,
            session: &self.session,
            cursor_position: self.cursor_position,
            scroll_offset: self.scroll_offset,
            visible_height: self.run_list.visible_height(),
        };
        self.run_list.view(&ctx)
    }

    /// Rows left for the slot panels below the run list.
    pub(super) fn panel_height(&self) -> usize {
        let list_rows = self
            .runs
            .len()
            .saturating_sub(self.scroll_offset)
            .min(self.run_list.visible_height())
            .max(1);
        usize::from(self.height)
            .saturating_sub(usize::from(CHROME_HEIGHT))
            .saturating_sub(list_rows)
    }

    /// Renders the visible slot panels side by side.
    pub(super) fn render_panels(&self, max_height: usize) -> String {
        let visible: Vec<SlotIndex> = SlotIndex::ALL
            .into_iter()
            .filter(|&slot| self.session.slot(slot).is_visible())
            .collect();
        if visible.is_empty() {
            return "  Press 1 or 2 to assign the selected run to a slot.\n".to_owned();
        }

        let total_width = usize::from(self.width).saturating_sub(1);
        let column_width = if visible.len() > 1 {
            total_width.saturating_sub(COLUMN_GAP).div_euclid(2)
        } else {
            total_width
        };

        let placeholders = media_placeholders(&self.session);
        let columns: Vec<Vec<String>> = visible
            .iter()
            .filter_map(|&slot| {
                let payload = self.session.slot(slot).payload()?;
                let first_placeholder = placeholders
                    .iter()
                    .position(|placeholder| placeholder.slot == slot)
                    .unwrap_or(0);
                let mut lines = self.panel.lines(&ScenarioPanelViewContext {
                    slot,
                    payload,
                    first_placeholder,
                    focused_placeholder: self.media_focus,
                    width: column_width,
                });
                truncate_lines(&mut lines, max_height);
                Some(lines)
            })
            .collect();

        match columns.as_slice() {
            [left, right] => side_by_side(left, right, column_width, COLUMN_GAP),
            [single] => single.iter().fold(String::new(), |mut output, line| {
                output.push_str(fit_to_width(line, column_width).trim_end());
                output.push('\n');
                output
            }),
            _ => String::new(),
        }
    }

    /// Renders the status bar with key hints.
    pub(super) fn render_status_bar(&self) -> String {
        let hints = if self.media_focus.is_some() {
            "Tab/S-Tab:media  Enter:open  Esc:unfocus  ?:help  q:quit"
        } else if self.width <= 80 {
            "q:quit  ?:help  j/k:move  1/2:slot  Tab:media"
        } else {
            "j/k:move  1/2:toggle slot  Tab/S-Tab:media  Enter:open  ?:help  q:quit"
        };
        format!("{hints}\n")
    }

    /// Renders the modal for an opened media placeholder.
    pub(super) fn render_media_modal(&self, placeholder: &MediaPlaceholder) -> String {
        let ctx = MediaModalViewContext {
            placeholder,
            state: self.session.media().state(&placeholder.test_id),
        };
        let mut output = self.render_header();
        output.push('\n');
        output.push_str(&self.modal.view(&ctx));
        output
    }

    /// Renders the help overlay if visible.
    pub(super) fn render_help_overlay(&self) -> String {
        if !self.show_help {
            return String::new();
        }

        let help_text = r"
=== Keyboard Shortcuts ===

Runs:
  j, Down    Move cursor down
  k, Up      Move cursor up
  Home, g    Go to first run
  End, G     Go to last run

Slots:
  1          Toggle the selected run on slot 1
  2          Toggle the selected run on slot 2

Media:
  Tab        Focus next image placeholder
  Shift-Tab  Focus previous image placeholder
  Enter      Open focused image
  Esc        Close image, or drop focus

Other:
  ?          Toggle this help
  q          Quit

Press any key to close this help.
";
        help_text.to_owned()
    }
}
