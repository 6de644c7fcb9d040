//! Dual-slot comparison engine.
//!
//! A [`ComparisonSession`] owns a fixed target test identifier and two
//! slots. Toggling a run onto a slot issues a [`ResolutionRequest`]; the
//! caller fetches the run's tree, resolves it with [`resolve_request`], and
//! hands the [`SettledResolution`] back to the session. Only resolutions that
//! are still current when they settle reach the [`SlotStore`].

pub mod media;
pub mod resolver;
pub mod selection;
pub mod session;
pub mod slots;

pub use media::{MediaCache, MediaState};
pub use resolver::{Location, ResolutionCount, RunAttribution, ScenarioPayload, locate, resolve};
pub use selection::{
    Generation, ResolutionOutcome, ResolutionRequest, SelectionController, SettledResolution,
    Settlement,
};
pub use session::{ComparisonSession, resolve_request};
pub use slots::{PerSlot, SlotContent, SlotIndex, SlotStore};
