//! runcompare library crate for comparing two runs of the same test.
//!
//! A run's result tree (feature, scenario or outline, step, log, media) is
//! loaded through a [`catalog::RunCatalog`]. The [`compare`] module resolves
//! a target test identifier inside that tree and keeps two comparison slots
//! consistent while the user toggles runs in and out. The [`tui`] module
//! renders both slots side by side.

pub mod catalog;
pub mod compare;
pub mod config;
pub mod telemetry;
pub mod tui;

pub use catalog::{
    CatalogError, HttpCatalogConfig, HttpRunCatalog, InMemoryRunCatalog, MediaSource, RunCatalog,
};
pub use compare::{ComparisonSession, ScenarioPayload, SlotContent, SlotIndex};
pub use config::RunCompareConfig;
pub use telemetry::{JsonlTelemetrySink, NoopTelemetrySink, TelemetryEvent, TelemetrySink};
