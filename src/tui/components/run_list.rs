//! Run list component for assigning runs to comparison slots.
//!
//! Each row shows the two slot toggles, the run name, its start time, and a
//! status badge. Toggles for slots the run currently feeds are highlighted.

use crate::catalog::models::{Run, Status};
use crate::compare::{ComparisonSession, SlotIndex};

use super::format::format_start_time;
use super::layout::highlight;

/// Default visible height for the run list component.
const DEFAULT_VISIBLE_HEIGHT: usize = 10;

/// Context for rendering the run list view.
#[derive(Debug, Clone, Copy)]
pub struct RunListViewContext<'a> {
    /// Runs in display order.
    pub runs: &'a [Run],
    /// Session providing slot membership.
    pub session: &'a ComparisonSession,
    /// Current cursor position (0-indexed).
    pub cursor_position: usize,
    /// Index of the first visible run.
    pub scroll_offset: usize,
    /// Maximum visible height in lines.
    pub visible_height: usize,
}

/// Component for displaying the selectable run list.
#[derive(Debug, Clone)]
pub struct RunListComponent {
    visible_height: usize,
}

impl Default for RunListComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl RunListComponent {
    /// Creates a new run list component.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            visible_height: DEFAULT_VISIBLE_HEIGHT,
        }
    }

    /// Updates the visible height for scrolling calculations.
    pub const fn set_visible_height(&mut self, height: usize) {
        self.visible_height = height;
    }

    /// Returns the visible height.
    #[must_use]
    pub const fn visible_height(&self) -> usize {
        self.visible_height
    }

    /// Renders the visible window of the run list.
    #[must_use]
    pub fn view(&self, ctx: &RunListViewContext<'_>) -> String {
        if ctx.runs.is_empty() {
            return "  No runs available for this project.\n".to_owned();
        }

        let visible_height = if ctx.visible_height > 0 {
            ctx.visible_height
        } else {
            self.visible_height
        };

        let lines: Vec<String> = ctx
            .runs
            .iter()
            .enumerate()
            .skip(ctx.scroll_offset)
            .take(visible_height)
            .map(|(index, run)| format_run_line(run, ctx.session, index == ctx.cursor_position))
            .collect();

        let mut output = lines.join("\n");
        output.push('\n');
        output
    }
}

fn format_run_line(run: &Run, session: &ComparisonSession, is_selected: bool) -> String {
    let prefix = if is_selected { ">" } else { " " };
    let toggles: Vec<String> = SlotIndex::ALL
        .iter()
        .map(|&slot| {
            highlight(
                &format!("[{}]", slot.number()),
                session.is_member(&run.id, slot),
            )
        })
        .collect();

    format!(
        "{prefix} {} {}  {}  {}",
        toggles.join(" "),
        run.name,
        format_start_time(&run.start_time),
        status_badge(&run.status)
    )
}

fn status_badge(status: &Status) -> String {
    match status {
        Status::Pass => "PASS".to_owned(),
        Status::Fail => "FAIL".to_owned(),
        Status::Other(value) if value.is_empty() => "-".to_owned(),
        Status::Other(value) => value.to_uppercase(),
    }
}
