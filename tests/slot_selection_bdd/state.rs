//! Scenario state for slot selection behavioural tests.

use runcompare::catalog::InMemoryRunCatalog;
use runcompare::catalog::models::Run;
use runcompare::catalog::models::test_support::run;
use runcompare::compare::{ComparisonSession, ResolutionRequest, Settlement};
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;

use crate::support::runtime::SharedRuntime;

/// State shared across steps in a slot selection scenario.
#[derive(ScenarioState, Default)]
pub(crate) struct SelectionState {
    /// Runtime driving tree fetches.
    pub(crate) runtime: Slot<SharedRuntime>,
    /// Catalog seeded by the `Given` steps.
    pub(crate) catalog: Slot<InMemoryRunCatalog>,
    /// Session under test.
    pub(crate) session: Slot<ComparisonSession>,
    /// Issued resolutions that have not completed, in issue order.
    pub(crate) pending: Slot<Vec<ResolutionRequest>>,
    /// Settlements in completion order.
    pub(crate) settlements: Slot<Vec<Settlement>>,
}

/// Builds the run a step refers to by name; ids are derived from names.
pub(crate) fn named_run(name: &str) -> Run {
    run(&format!("id-{name}"), name)
}
