//! UI components for the run comparison TUI.
//!
//! Components are stateless renderers over borrowed view contexts. The app
//! owns all state and hands each component what it needs per frame.

pub(crate) mod format;
pub(crate) mod layout;
mod media_modal;
mod run_list;
mod scenario_panel;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;

pub use media_modal::{MediaModalComponent, MediaModalViewContext};
pub use run_list::{RunListComponent, RunListViewContext};
pub use scenario_panel::{
    MediaPlaceholder, ScenarioPanelComponent, ScenarioPanelViewContext, media_placeholders,
};
