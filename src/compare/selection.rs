//! Per-run slot membership and the generation guard on slot writes.
//!
//! Every toggle or un-toggle advances the affected slot's generation. A
//! resolution is stamped with the generation current when it was issued,
//! and [`SelectionController::settle`] only writes it when that generation is
//! still current and the run is still a member of the slot. Late
//! completions of superseded requests are therefore dropped.

use std::collections::HashSet;
use std::time::Instant;

use crate::catalog::error::CatalogError;
use crate::catalog::models::{Run, RunId, TestId};

use super::resolver::{ResolutionCount, RunAttribution, ScenarioPayload};
use super::slots::{PerSlot, SlotIndex, SlotStore};

/// Monotonic counter of membership changes on one slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    /// Wraps a raw generation value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Request to resolve one run's tree into one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    /// Run whose tree is resolved.
    pub attribution: RunAttribution,
    /// Slot the result is destined for.
    pub slot: SlotIndex,
    /// Slot generation at issue time.
    pub generation: Generation,
    /// Test identifier searched for.
    pub target: TestId,
    /// When the request was issued.
    pub issued_at: Instant,
}

impl ResolutionRequest {
    /// Resolution token carried into the payload.
    #[must_use]
    pub const fn count(&self) -> ResolutionCount {
        self.generation.value()
    }
}

/// What a resolution produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// A matching scenario was found.
    Found(Box<ScenarioPayload>),
    /// The tree held no matching scenario.
    NotFound,
    /// The tree could not be fetched.
    FetchFailed(CatalogError),
}

/// A request together with its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettledResolution {
    /// The request that was resolved.
    pub request: ResolutionRequest,
    /// Its outcome.
    pub outcome: ResolutionOutcome,
}

/// How a settled resolution affected its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Settlement {
    /// The payload replaced the slot's content.
    Applied,
    /// Nothing matched; the slot was left unchanged.
    NotFound,
    /// The fetch failed; the slot was left unchanged.
    FetchFailed,
    /// The request was superseded and dropped.
    Stale,
}

impl Settlement {
    /// Stable lowercase label used in logs and telemetry.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::NotFound => "not_found",
            Self::FetchFailed => "fetch_failed",
            Self::Stale => "stale",
        }
    }
}

/// Tracks which runs feed which slot.
#[derive(Debug, Clone)]
pub struct SelectionController {
    target: TestId,
    members: HashSet<(RunId, SlotIndex)>,
    generations: PerSlot<Generation>,
}

impl SelectionController {
    /// Creates a controller resolving `target`.
    #[must_use]
    pub fn new(target: TestId) -> Self {
        Self {
            target,
            members: HashSet::new(),
            generations: PerSlot::default(),
        }
    }

    /// Whether `run_id` currently feeds `slot`.
    #[must_use]
    pub fn is_member(&self, run_id: &RunId, slot: SlotIndex) -> bool {
        self.members.contains(&(run_id.clone(), slot))
    }

    /// Current generation of `slot`.
    #[must_use]
    pub const fn generation(&self, slot: SlotIndex) -> Generation {
        *self.generations.get(slot)
    }

    /// Marks `run` as feeding `slot` and returns the resolution to perform.
    ///
    /// A slot showing a different run's payload is cleared first.
    pub fn toggle(
        &mut self,
        run: &Run,
        slot: SlotIndex,
        store: &mut SlotStore,
    ) -> ResolutionRequest {
        self.members.insert((run.id.clone(), slot));
        let generation = self.advance(slot);

        if store
            .get(slot)
            .run_id()
            .is_some_and(|shown| shown != &run.id)
        {
            store.clear(slot);
        }

        tracing::debug!(
            run_id = %run.id,
            %slot,
            generation = generation.value(),
            "slot toggled on"
        );
        ResolutionRequest {
            attribution: RunAttribution::from(run),
            slot,
            generation,
            target: self.target.clone(),
            issued_at: Instant::now(),
        }
    }

    /// Withdraws `run_id` from `slot` and empties the slot.
    ///
    /// Resolutions still in flight for the slot become stale.
    pub fn untoggle(&mut self, run_id: &RunId, slot: SlotIndex, store: &mut SlotStore) {
        self.members.remove(&(run_id.clone(), slot));
        let generation = self.advance(slot);
        store.clear(slot);
        tracing::debug!(%run_id, %slot, generation = generation.value(), "slot toggled off");
    }

    /// Applies a settled resolution if it is still current.
    pub fn settle(&self, settled: SettledResolution, store: &mut SlotStore) -> Settlement {
        let SettledResolution { request, outcome } = settled;
        let slot = request.slot;
        let run_id = &request.attribution.run_id;

        if request.generation != self.generation(slot) || !self.is_member(run_id, slot) {
            tracing::debug!(
                %run_id,
                %slot,
                generation = request.generation.value(),
                current = self.generation(slot).value(),
                "dropped stale resolution"
            );
            return Settlement::Stale;
        }

        match outcome {
            ResolutionOutcome::Found(payload) => {
                store.set(slot, *payload);
                Settlement::Applied
            }
            ResolutionOutcome::NotFound => {
                tracing::debug!(%run_id, %slot, target = %request.target, "no matching scenario");
                Settlement::NotFound
            }
            ResolutionOutcome::FetchFailed(error) => {
                tracing::warn!(%run_id, %slot, %error, "failed to fetch run tree");
                Settlement::FetchFailed
            }
        }
    }

    fn advance(&mut self, slot: SlotIndex) -> Generation {
        let generation = self.generations.get_mut(slot);
        *generation = generation.next();
        *generation
    }
}
