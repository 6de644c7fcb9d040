//! Slot toggles and resolution settlement.
//!
//! Toggling a run onto a slot issues a tree fetch as an async command. The
//! settled result comes back as [`AppMsg::ResolutionSettled`] and is handed
//! to the session, which drops it when the slot has moved on.

use std::any::Any;
use std::sync::Arc;

use bubbletea_rs::Cmd;

use super::CompareApp;
use crate::catalog::RunCatalog;
use crate::compare::{ResolutionRequest, SettledResolution, SlotIndex, resolve_request};
use crate::tui::messages::AppMsg;

impl CompareApp {
    /// Flips the run under the cursor on `slot`.
    pub(super) fn handle_toggle_slot(&mut self, slot: SlotIndex) -> Option<Cmd> {
        let run = self.selected_run()?.clone();
        let request = self.session.flip(&run, slot);
        self.clamp_media_focus();

        let Some(pending) = request else {
            tracing::debug!(run_id = %run.id, %slot, "run withdrawn from slot");
            return None;
        };
        let Some(catalog) = self.catalog.clone() else {
            tracing::debug!(run_id = %run.id, %slot, "no catalog configured; toggle not resolved");
            return None;
        };

        tracing::debug!(
            run_id = %run.id,
            %slot,
            generation = pending.generation.value(),
            "resolution issued"
        );
        self.in_flight = self.in_flight.saturating_add(1);
        Some(spawn_resolution(catalog, pending))
    }

    /// Applies a settled resolution through the session.
    pub(super) fn handle_resolution_settled(
        &mut self,
        settled: &SettledResolution,
    ) -> Option<Cmd> {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.session.settle(settled.clone());
        self.clamp_media_focus();
        None
    }
}

/// Fetches and resolves `request` off the update loop.
fn spawn_resolution(catalog: Arc<dyn RunCatalog>, request: ResolutionRequest) -> Cmd {
    Box::pin(async move {
        let settled = resolve_request(catalog.as_ref(), request).await;
        Some(Box::new(AppMsg::ResolutionSettled(Box::new(settled))) as Box<dyn Any + Send>)
    })
}
