//! `Model` trait implementation for the comparison TUI application.

use std::any::Any;
use std::sync::Arc;

use bubbletea_rs::{Cmd, Model};

use super::CompareApp;
use crate::catalog::models::TestId;
use crate::tui::components::layout::fit_to_width;
use crate::tui::input::map_key_to_message;
use crate::tui::messages::AppMsg;

impl Model for CompareApp {
    fn init() -> (Self, Option<Cmd>) {
        let model = crate::tui::get_compare_context().map_or_else(
            || {
                tracing::warn!("comparison context not set; starting empty");
                Self::new(Vec::new(), TestId::new(""))
            },
            |context| {
                Self::new(context.runs.clone(), context.target.clone())
                    .with_catalog(Arc::clone(&context.catalog))
                    .with_media_source(Arc::clone(&context.media))
                    .with_telemetry(Arc::clone(&context.telemetry))
            },
        );
        (model, None)
    }

    fn update(&mut self, msg: Box<dyn Any + Send>) -> Option<Cmd> {
        if let Some(app_msg) = msg.downcast_ref::<AppMsg>() {
            return self.handle_message(app_msg);
        }

        if let Some(key_msg) = msg.downcast_ref::<bubbletea_rs::event::KeyMsg>() {
            if self.show_help {
                return self.handle_message(&AppMsg::ToggleHelp);
            }
            let mapped = map_key_to_message(key_msg)?;
            if self.media_modal.is_some()
                && !matches!(mapped, AppMsg::EscapePressed | AppMsg::Quit)
            {
                return None;
            }
            return self.handle_message(&mapped);
        }

        if let Some(size_msg) = msg.downcast_ref::<bubbletea_rs::event::WindowSizeMsg>() {
            let resize_msg = AppMsg::WindowResized {
                width: size_msg.width,
                height: size_msg.height,
            };
            return self.handle_message(&resize_msg);
        }

        None
    }

    fn view(&self) -> String {
        if self.show_help {
            return self.normalise_viewport(&self.render_help_overlay());
        }
        if let Some(placeholder) = &self.media_modal {
            return self.normalise_viewport(&self.render_media_modal(placeholder));
        }

        let mut output = String::new();
        output.push_str(&self.render_header());
        output.push_str(&self.render_run_list());
        output.push('\n');
        output.push_str(&self.render_panels(self.panel_height()));
        output.push_str(&self.render_status_bar());

        self.normalise_viewport(&output)
    }
}

impl CompareApp {
    /// Normalises the rendered frame to terminal dimensions.
    ///
    /// Rows are kept one column short of the terminal width to avoid
    /// autowrap, and padded so shorter frames clear stale cells.
    fn normalise_viewport(&self, output: &str) -> String {
        let safe_width = usize::from(self.width.max(1)).saturating_sub(1).max(1);
        let height = usize::from(self.height.max(1));

        let mut lines: Vec<String> = output
            .lines()
            .map(|line| fit_to_width(line, safe_width))
            .collect();
        lines.truncate(height);

        let missing = height.saturating_sub(lines.len());
        let blank = " ".repeat(safe_width);
        lines.extend(std::iter::repeat_with(|| blank.clone()).take(missing));

        let mut normalised = lines.join("\n");
        normalised.push('\n');
        normalised
    }
}
