//! Message types for the TUI update loop.
//!
//! This module defines all message types that can be sent to the application's
//! update function. Messages represent user actions, async command results,
//! and system events.

use crate::catalog::error::CatalogError;
use crate::catalog::models::{MediaBody, TestId};
use crate::compare::{SettledResolution, SlotIndex};

/// Messages for the run comparison TUI application.
#[derive(Debug, Clone)]
pub enum AppMsg {
    // Navigation
    /// Move cursor up one run.
    CursorUp,
    /// Move cursor down one run.
    CursorDown,
    /// Move cursor to the first run.
    Home,
    /// Move cursor to the last run.
    End,

    // Slot selection
    /// Toggle the run under the cursor on a slot.
    ToggleSlot(SlotIndex),
    /// A tree fetch and resolution finished.
    ResolutionSettled(Box<SettledResolution>),

    // Media
    /// Focus the next media placeholder.
    NextMedia,
    /// Focus the previous media placeholder.
    PreviousMedia,
    /// Open the focused media placeholder.
    OpenMedia,
    /// A media body fetch finished.
    MediaLoaded {
        /// Test identifier the media is keyed by.
        test_id: TestId,
        /// Fetched body or the failure.
        result: Result<MediaBody, CatalogError>,
    },

    // Application lifecycle
    /// Close the media modal, or drop media focus when no modal is open.
    EscapePressed,
    /// Quit the application.
    Quit,
    /// Toggle help overlay.
    ToggleHelp,

    // Window events
    /// Terminal window was resized.
    WindowResized {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },
}

impl AppMsg {
    /// Returns whether this message moves the run cursor.
    #[must_use]
    pub const fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::CursorUp | Self::CursorDown | Self::Home | Self::End
        )
    }

    /// Returns whether this message concerns slot selection.
    #[must_use]
    pub const fn is_selection(&self) -> bool {
        matches!(self, Self::ToggleSlot(_) | Self::ResolutionSettled(_))
    }

    /// Returns whether this message concerns media placeholders.
    #[must_use]
    pub const fn is_media(&self) -> bool {
        matches!(
            self,
            Self::NextMedia
                | Self::PreviousMedia
                | Self::OpenMedia
                | Self::MediaLoaded { .. }
                | Self::EscapePressed
        )
    }
}
