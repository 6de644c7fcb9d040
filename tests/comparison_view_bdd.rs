//! Behavioural tests for the comparison TUI view.

mod support {
    #[path = "../support/runtime.rs"]
    pub mod runtime;
}

#[path = "comparison_view_bdd/mod.rs"]
mod comparison_view_bdd_support;

use std::sync::Arc;

use bubbletea_rs::{Cmd, Model};
use comparison_view_bdd_support::ViewState;
use crossterm::event::{KeyCode, KeyModifiers};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use runcompare::catalog::models::test_support::{feature, log_entry, run, scenario, step};
use runcompare::catalog::models::{MediaBody, StepNode, TestId};
use runcompare::catalog::{InMemoryRunCatalog, MediaSource, RunCatalog};
use runcompare::compare::SlotIndex;
use runcompare::tui::app::CompareApp;
use runcompare::tui::components::test_utils::{line_containing, strip_ansi_codes};
use runcompare::tui::messages::AppMsg;
use support::runtime::ensure_runtime;

type StepResult = Result<(), Box<dyn std::error::Error>>;

const TARGET: &str = "login";

#[fixture]
fn view_state() -> ViewState {
    ViewState::default()
}

impl ViewState {
    fn add_run(&self, name: &str, steps: Vec<StepNode>) {
        let catalog = self
            .catalog
            .take()
            .unwrap_or_else(InMemoryRunCatalog::new)
            .with_run(
                run(&format!("id-{name}"), name),
                vec![feature("f1", vec![scenario(&format!("{name}-s1"), TARGET, steps)])],
            );
        self.catalog.set(catalog);
    }

    /// Awaits `cmd` and feeds its message back into the app.
    fn drive(&self, cmd: Cmd) -> StepResult {
        let runtime = ensure_runtime(&self.runtime)?;
        let Some(msg) = runtime.block_on(cmd) else {
            return Ok(());
        };
        let follow_up = self
            .app
            .with_mut(|app| app.update(msg))
            .ok_or("app must be initialised")?;
        follow_up.map_or(Ok(()), |next| self.drive(next))
    }

    fn send(&self, msg: &AppMsg) -> StepResult {
        let cmd = self
            .app
            .with_mut(|app| app.handle_message(msg))
            .ok_or("app must be initialised")?;
        cmd.map_or(Ok(()), |next| self.drive(next))
    }

    fn rendered_view(&self) -> Result<String, Box<dyn std::error::Error>> {
        Ok(self
            .app
            .with_ref(CompareApp::view)
            .ok_or("app must be initialised")?)
    }
}

// Given steps

#[given("a passing run {name}")]
fn given_passing_run(view_state: &ViewState, name: String) {
    view_state.add_run(&name, vec![step("st1", "open page", "pass")]);
}

#[given("a failing run {name} with a screenshot")]
fn given_failing_run(view_state: &ViewState, name: String) {
    let mut failing = step("st2", "submit form", "fail");
    failing.logs.push(log_entry("t-shot", "timeout", 1));
    view_state.add_run(&name, vec![failing]);

    let catalog = view_state
        .catalog
        .take()
        .unwrap_or_else(InMemoryRunCatalog::new)
        .with_media(
            TestId::new("t-shot"),
            MediaBody::new("data:image/png;base64,AAAA"),
        );
    view_state.catalog.set(catalog);
}

#[given("the comparison view is open at {width:u16} by {height:u16}")]
fn given_view_open(view_state: &ViewState, width: u16, height: u16) -> StepResult {
    let catalog = Arc::new(
        view_state
            .catalog
            .get()
            .ok_or("catalog must be seeded")?,
    );
    let app = CompareApp::new(catalog.runs().to_vec(), TestId::new(TARGET))
        .with_catalog(Arc::clone(&catalog) as Arc<dyn RunCatalog>)
        .with_media_source(catalog as Arc<dyn MediaSource>);
    view_state.app.set(app);
    view_state.send(&AppMsg::WindowResized { width, height })
}

// When steps

#[when("the selected run is assigned to slot {slot:u8}")]
fn when_assigned(view_state: &ViewState, slot: u8) -> StepResult {
    let slot_index = SlotIndex::from_number(slot).ok_or("no such slot")?;
    view_state.send(&AppMsg::ToggleSlot(slot_index))
}

#[when("the cursor moves down")]
fn when_cursor_down(view_state: &ViewState) -> StepResult {
    view_state.send(&AppMsg::CursorDown)
}

#[when("the next media placeholder is opened")]
fn when_media_opened(view_state: &ViewState) -> StepResult {
    view_state.send(&AppMsg::NextMedia)?;
    view_state.send(&AppMsg::OpenMedia)
}

#[when("the key {key} is pressed")]
fn when_key_pressed(view_state: &ViewState, key: String) -> StepResult {
    let character = key.chars().next().ok_or("key must not be empty")?;
    let key_msg = bubbletea_rs::event::KeyMsg {
        key: KeyCode::Char(character),
        modifiers: KeyModifiers::empty(),
    };
    let cmd = view_state
        .app
        .with_mut(|app| app.update(Box::new(key_msg)))
        .ok_or("app must be initialised")?;
    cmd.map_or(Ok(()), |next| view_state.drive(next))
}

// Then steps

#[then("one row shows {left} beside {right}")]
fn then_row_pairs(view_state: &ViewState, left: String, right: String) -> StepResult {
    let view = view_state.rendered_view()?;
    let left_text = left.trim_matches('"');
    let right_text = right.trim_matches('"');
    let row = line_containing(&view, left_text)
        .ok_or_else(|| format!("no row contains '{left_text}':\n{view}"))?;
    if !row.contains(right_text) {
        return Err(format!("row '{row}' does not contain '{right_text}'").into());
    }
    Ok(())
}

#[then("the view shows {text}")]
fn then_view_shows(view_state: &ViewState, text: String) -> StepResult {
    let view = strip_ansi_codes(&view_state.rendered_view()?);
    let expected = text.trim_matches('"');
    if !view.contains(expected) {
        return Err(format!("expected '{expected}' in view:\n{view}").into());
    }
    Ok(())
}

#[then("the view does not show {text}")]
fn then_view_hides(view_state: &ViewState, text: String) -> StepResult {
    let view = strip_ansi_codes(&view_state.rendered_view()?);
    let unexpected = text.trim_matches('"');
    if view.contains(unexpected) {
        return Err(format!("did not expect '{unexpected}' in view:\n{view}").into());
    }
    Ok(())
}

#[scenario(path = "tests/features/comparison_view.feature", index = 0)]
fn two_slots_render_side_by_side(view_state: ViewState) {
    let _ = view_state;
}

#[scenario(path = "tests/features/comparison_view.feature", index = 1)]
fn screenshot_placeholder_opens_media_modal(view_state: ViewState) {
    let _ = view_state;
}

#[scenario(path = "tests/features/comparison_view.feature", index = 2)]
fn empty_comparison_prompts_for_slot(view_state: ViewState) {
    let _ = view_state;
}

#[scenario(path = "tests/features/comparison_view.feature", index = 3)]
fn help_overlay_closes_on_any_key(view_state: ViewState) {
    let _ = view_state;
}
