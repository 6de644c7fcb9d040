//! Modal showing one media attachment.
//!
//! The terminal cannot draw the image, so the modal shows what was fetched:
//! the MIME type and size of the encoded body, or a loading state until the
//! body is available.

use crate::compare::MediaState;

use super::format::format_size;
use super::scenario_panel::MediaPlaceholder;

/// Context for rendering the media modal.
#[derive(Debug, Clone, Copy)]
pub struct MediaModalViewContext<'a> {
    /// Placeholder the modal was opened from.
    pub placeholder: &'a MediaPlaceholder,
    /// Cache state of its body; `None` before a fetch was registered.
    pub state: Option<&'a MediaState>,
}

/// Renders the media modal.
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaModalComponent;

impl MediaModalComponent {
    /// Creates a new modal component.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Renders the modal body.
    #[must_use]
    pub fn view(&self, ctx: &MediaModalViewContext<'_>) -> String {
        let placeholder = ctx.placeholder;
        let mut output = format!(
            "Media for {} ({})\n\n",
            placeholder.test_id, placeholder.slot
        );
        if let Some(label) = &placeholder.label {
            output.push_str(&format!("  Label: {label}\n"));
        }

        let summary = ctx.state.and_then(MediaState::body).map_or_else(
            || "  Loading...\n".to_owned(),
            |body| {
                format!(
                    "  Type:  {}\n  Size:  {}\n",
                    body.mime_type().unwrap_or("unknown type"),
                    format_size(body.len())
                )
            },
        );
        output.push_str(&summary);

        output.push_str("\nPress Esc to close.\n");
        output
    }
}
