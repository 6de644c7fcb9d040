//! One comparison session: a fixed target, two slots, and their selection.

use std::fmt;
use std::sync::Arc;

use crate::catalog::RunCatalog;
use crate::catalog::error::CatalogError;
use crate::catalog::models::{MediaBody, Run, RunId, TestId};
use crate::telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink};

use super::media::MediaCache;
use super::resolver::resolve;
use super::selection::{
    ResolutionOutcome, ResolutionRequest, SelectionController, SettledResolution, Settlement,
};
use super::slots::{SlotContent, SlotIndex, SlotStore};

/// State of one comparison between two runs of the same test.
///
/// Slot mutation goes through [`ComparisonSession::toggle`],
/// [`ComparisonSession::untoggle`], and [`ComparisonSession::settle`].
pub struct ComparisonSession {
    target: TestId,
    store: SlotStore,
    controller: SelectionController,
    media: MediaCache,
    telemetry: Arc<dyn TelemetrySink>,
}

impl fmt::Debug for ComparisonSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComparisonSession")
            .field("target", &self.target)
            .field("store", &self.store)
            .field("controller", &self.controller)
            .field("media", &self.media)
            .finish_non_exhaustive()
    }
}

impl ComparisonSession {
    /// Starts a session comparing runs of `target` with both slots empty.
    #[must_use]
    pub fn new(target: TestId) -> Self {
        Self {
            controller: SelectionController::new(target.clone()),
            target,
            store: SlotStore::new(),
            media: MediaCache::new(),
            telemetry: Arc::new(NoopTelemetrySink),
        }
    }

    /// Routes settlement events to `sink`.
    #[must_use]
    pub fn with_telemetry(mut self, sink: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = sink;
        self
    }

    /// The test identifier both slots resolve.
    #[must_use]
    pub const fn target(&self) -> &TestId {
        &self.target
    }

    /// Content of `slot`.
    #[must_use]
    pub const fn slot(&self, slot: SlotIndex) -> &SlotContent {
        self.store.get(slot)
    }

    /// The slot store.
    #[must_use]
    pub const fn store(&self) -> &SlotStore {
        &self.store
    }

    /// Whether `run_id` currently feeds `slot`.
    #[must_use]
    pub fn is_member(&self, run_id: &RunId, slot: SlotIndex) -> bool {
        self.controller.is_member(run_id, slot)
    }

    /// Assigns `run` to `slot`; the returned request must be resolved and
    /// passed back to [`ComparisonSession::settle`].
    pub fn toggle(&mut self, run: &Run, slot: SlotIndex) -> ResolutionRequest {
        self.controller.toggle(run, slot, &mut self.store)
    }

    /// Withdraws `run_id` from `slot`, emptying it.
    pub fn untoggle(&mut self, run_id: &RunId, slot: SlotIndex) {
        self.controller.untoggle(run_id, slot, &mut self.store);
    }

    /// Toggles `run` on `slot` when it is not a member, and off otherwise.
    ///
    /// Returns the resolution to perform when the run was toggled on.
    pub fn flip(&mut self, run: &Run, slot: SlotIndex) -> Option<ResolutionRequest> {
        if self.is_member(&run.id, slot) {
            self.untoggle(&run.id, slot);
            None
        } else {
            Some(self.toggle(run, slot))
        }
    }

    /// Applies a settled resolution and records its disposition.
    pub fn settle(&mut self, settled: SettledResolution) -> Settlement {
        let slot = settled.request.slot;
        let run_id = settled.request.attribution.run_id.to_string();
        let latency = settled.request.issued_at.elapsed();

        let settlement = self.controller.settle(settled, &mut self.store);

        self.telemetry.record(TelemetryEvent::ResolutionSettled {
            slot: slot.number(),
            run_id,
            disposition: settlement.label().to_owned(),
            latency_ms: u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
        });
        settlement
    }

    /// The session's media cache.
    #[must_use]
    pub const fn media(&self) -> &MediaCache {
        &self.media
    }

    /// Registers interest in a media body; `true` means a fetch should be
    /// issued.
    pub fn request_media(&mut self, test_id: &TestId) -> bool {
        self.media.begin(test_id)
    }

    /// Stores a completed media fetch.
    pub fn complete_media(&mut self, test_id: &TestId, result: Result<MediaBody, CatalogError>) {
        self.telemetry.record(TelemetryEvent::MediaFetched {
            test_id: test_id.to_string(),
            success: result.is_ok(),
        });
        self.media.complete(test_id, result);
    }
}

/// Fetches the run's tree and resolves the request's target in it.
pub async fn resolve_request(
    catalog: &dyn RunCatalog,
    request: ResolutionRequest,
) -> SettledResolution {
    let outcome = match catalog.fetch_tree(&request.attribution.run_id).await {
        Ok(tree) => resolve(
            &tree,
            &request.target,
            &request.attribution,
            request.count(),
        )
        .map_or(ResolutionOutcome::NotFound, |payload| {
            ResolutionOutcome::Found(Box::new(payload))
        }),
        Err(error) => ResolutionOutcome::FetchFailed(error),
    };
    SettledResolution { request, outcome }
}
