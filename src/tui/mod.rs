//! Terminal User Interface for comparing two runs of the same test.
//!
//! This module provides an interactive TUI for assigning runs to the two
//! comparison slots and viewing their scenario detail side by side, using
//! the bubbletea-rs framework.
//!
//! # Architecture
//!
//! The TUI follows the Model-View-Update (MVU) pattern:
//!
//! - **Model**: Application state in [`app::CompareApp`]
//! - **View**: Rendering logic in each component's `view()` method
//! - **Update**: Message-driven state transitions in `update()`
//!
//! Slot state lives in a [`crate::compare::ComparisonSession`] owned by the
//! app. Tree and media fetches run as async commands whose results come back
//! as [`messages::AppMsg`] values.
//!
//! # Initial Data Loading
//!
//! Because bubbletea-rs's `Model` trait requires `init()` to be a static
//! function, the runs, target, and catalog handles are stored at module
//! level. Call [`set_compare_context`] before starting the program, and
//! `CompareApp::init()` will retrieve them.

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::catalog::models::{Run, TestId};
use crate::catalog::{MediaSource, RunCatalog};
use crate::telemetry::TelemetrySink;

pub mod app;
pub mod components;
pub mod input;
pub mod messages;

pub use app::CompareApp;

/// Global storage for the comparison context.
///
/// This is set before the TUI program starts and read by `CompareApp::init()`.
static COMPARE_CONTEXT: OnceLock<CompareContext> = OnceLock::new();

/// Everything a comparison session needs at startup.
pub struct CompareContext {
    /// Runs offered for comparison, in display order.
    pub runs: Vec<Run>,
    /// Test identifier compared across runs.
    pub target: TestId,
    /// Catalog used to load run trees.
    pub catalog: Arc<dyn RunCatalog>,
    /// Source of media bodies.
    pub media: Arc<dyn MediaSource>,
    /// Sink for settlement telemetry.
    pub telemetry: Arc<dyn TelemetrySink>,
}

impl fmt::Debug for CompareContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompareContext")
            .field("runs", &self.runs.len())
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

/// Sets the comparison context for the TUI application.
///
/// This must be called before starting the bubbletea-rs program.
///
/// # Returns
///
/// `true` if the context was set, `false` if it was already set.
pub fn set_compare_context(context: CompareContext) -> bool {
    COMPARE_CONTEXT.set(context).is_ok()
}

/// Gets the stored comparison context, if one was set.
pub(crate) fn get_compare_context() -> Option<&'static CompareContext> {
    COMPARE_CONTEXT.get()
}
