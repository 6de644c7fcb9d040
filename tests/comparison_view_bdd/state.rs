//! Scenario state for comparison view behavioural tests.

use runcompare::catalog::InMemoryRunCatalog;
use runcompare::tui::app::CompareApp;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;

use crate::support::runtime::SharedRuntime;

/// State shared across steps in a comparison view scenario.
#[derive(ScenarioState, Default)]
pub(crate) struct ViewState {
    /// Runtime that drives commands returned by the app.
    pub(crate) runtime: Slot<SharedRuntime>,
    /// Catalog seeded by the `Given` steps.
    pub(crate) catalog: Slot<InMemoryRunCatalog>,
    /// Application under test.
    pub(crate) app: Slot<CompareApp>,
}
