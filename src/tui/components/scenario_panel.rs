//! Slot panel component showing one resolved scenario.
//!
//! A panel is produced only for a visible slot. Media attachments render as
//! `[View Image]` placeholders numbered across both panels, slot 1 first,
//! so `Tab` focus can move from one panel into the other.

use crate::catalog::models::{Status, StepNode, TestId};
use crate::compare::{ComparisonSession, ScenarioPayload, SlotIndex};

use super::format::{format_duration, format_start_time};
use super::layout::{ANSI_BOLD, ANSI_RESET, highlight, wrap_words};

const PLACEHOLDER: &str = "[View Image]";

/// A media placeholder as addressed by keyboard focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPlaceholder {
    /// Slot whose panel renders the placeholder.
    pub slot: SlotIndex,
    /// Identifier the body is fetched by.
    pub test_id: TestId,
    /// Label sent with the media entry, if any.
    pub label: Option<String>,
}

/// Lists the placeholders of every visible panel in focus order.
#[must_use]
pub fn media_placeholders(session: &ComparisonSession) -> Vec<MediaPlaceholder> {
    SlotIndex::ALL
        .iter()
        .filter_map(|&slot| session.slot(slot).payload().map(|payload| (slot, payload)))
        .flat_map(|(slot, payload)| payload_placeholders(slot, payload))
        .collect()
}

fn payload_placeholders(slot: SlotIndex, payload: &ScenarioPayload) -> Vec<MediaPlaceholder> {
    payload
        .steps
        .iter()
        .flat_map(|step| step.logs.iter())
        .flat_map(|log| {
            log.media.iter().flatten().map(move |entry| MediaPlaceholder {
                slot,
                test_id: log.test.clone(),
                label: entry.label.clone(),
            })
        })
        .collect()
}

/// Context for rendering one slot panel.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioPanelViewContext<'a> {
    /// Slot the panel belongs to.
    pub slot: SlotIndex,
    /// Payload held by the slot.
    pub payload: &'a ScenarioPayload,
    /// Focus index of this panel's first placeholder.
    pub first_placeholder: usize,
    /// Currently focused placeholder, across both panels.
    pub focused_placeholder: Option<usize>,
    /// Column width available to the panel.
    pub width: usize,
}

/// Renders a populated slot as a column of lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScenarioPanelComponent;

impl ScenarioPanelComponent {
    /// Creates a new panel component.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Renders the panel lines, unpadded.
    #[must_use]
    pub fn lines(&self, ctx: &ScenarioPanelViewContext<'_>) -> Vec<String> {
        let payload = ctx.payload;
        let mut lines = vec![
            format!(
                "{ANSI_BOLD}{} · {} · {}{ANSI_RESET}",
                ctx.slot,
                payload.run_name,
                format_start_time(&payload.run_start_time)
            ),
            format!("Scenario: {}", payload.name),
        ];

        if !payload.tags.is_empty() {
            lines.push(format!("Tags: {}", payload.tags.join(", ")));
        }
        lines.push(format!("Duration: {}", format_duration(payload.duration_ms)));
        if !payload.error_states.is_empty() {
            lines.push(format!("Errors: {}", payload.error_states.join(", ")));
        }

        let description = payload.description.to_plain_text();
        if !description.is_empty() {
            lines.push(String::new());
            lines.extend(wrap_words(&description, ctx.width));
        }

        lines.push(String::new());
        let mut placeholder_index = ctx.first_placeholder;
        for step in &payload.steps {
            push_step(&mut lines, step, ctx, &mut placeholder_index);
        }
        lines
    }
}

fn push_step(
    lines: &mut Vec<String>,
    step: &StepNode,
    ctx: &ScenarioPanelViewContext<'_>,
    placeholder_index: &mut usize,
) {
    lines.push(format!("{} {}", step_marker(&step.status), step.name));

    for log in &step.logs {
        let details = log.details.to_plain_text();
        if !details.is_empty() {
            let indent_width = ctx.width.saturating_sub(4);
            lines.extend(
                wrap_words(&details, indent_width)
                    .into_iter()
                    .map(|line| format!("    {line}")),
            );
        }
        for _entry in log.media.iter().flatten() {
            let focused = ctx.focused_placeholder == Some(*placeholder_index);
            lines.push(format!("    {}", highlight(PLACEHOLDER, focused)));
            *placeholder_index = placeholder_index.saturating_add(1);
        }
    }
}

const fn step_marker(status: &Status) -> char {
    if status.is_pass() { '✔' } else { '✘' }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::catalog::models::test_support::{log_entry, run, scenario, step};
    use crate::catalog::models::RichText;
    use crate::compare::{ResolutionOutcome, RunAttribution, SettledResolution};
    use crate::tui::components::test_utils::strip_ansi_codes;

    #[fixture]
    fn payload() -> ScenarioPayload {
        let mut node = scenario(
            "s1",
            "login",
            vec![
                step("st1", "open page", "pass"),
                step("st2", "submit form", "fail"),
            ],
        );
        node.tags = vec!["smoke".to_owned(), "auth".to_owned()];
        node.duration_ms = 65_000;
        node.description = RichText::new("<p>Signs <b>in</b></p>");
        if let Some(second) = node.steps.get_mut(1) {
            second.logs.push(log_entry("t-9", "<i>timeout</i>", 2));
        }
        let nightly = run("r1", "nightly-1");
        ScenarioPayload::from_node(&node, &RunAttribution::from(&nightly), 1)
    }

    fn render(payload: &ScenarioPayload, focused: Option<usize>) -> Vec<String> {
        ScenarioPanelComponent::new().lines(&ScenarioPanelViewContext {
            slot: SlotIndex::One,
            payload,
            first_placeholder: 0,
            focused_placeholder: focused,
            width: 40,
        })
    }

    #[rstest]
    fn panel_shows_attribution_and_details(payload: ScenarioPayload) {
        let lines: Vec<String> = render(&payload, None)
            .iter()
            .map(|line| strip_ansi_codes(line))
            .collect();

        assert_eq!(
            lines.first().map(String::as_str),
            Some("slot 1 · nightly-1 · 01/01/2025 00:00")
        );
        assert!(lines.contains(&"Tags: smoke, auth".to_owned()));
        assert!(lines.contains(&"Duration: 1m 5s".to_owned()));
        assert!(lines.contains(&"Signs in".to_owned()));
        assert!(lines.contains(&"✔ open page".to_owned()));
        assert!(lines.contains(&"✘ submit form".to_owned()));
        assert!(lines.contains(&"    timeout".to_owned()));
    }

    #[rstest]
    fn each_media_entry_renders_a_placeholder(payload: ScenarioPayload) {
        let count = render(&payload, None)
            .iter()
            .filter(|line| line.contains(PLACEHOLDER))
            .count();

        assert_eq!(count, 2);
    }

    #[rstest]
    fn focused_placeholder_is_highlighted(payload: ScenarioPayload) {
        let lines = render(&payload, Some(1));
        let highlighted: Vec<&String> = lines
            .iter()
            .filter(|line| line.contains(PLACEHOLDER))
            .collect();

        assert_eq!(highlighted.len(), 2);
        assert!(!highlighted.first().is_some_and(|line| line.contains("\x1b[7m")));
        assert!(highlighted.get(1).is_some_and(|line| line.contains("\x1b[7m")));
    }

    #[rstest]
    fn placeholders_follow_slot_order(payload: ScenarioPayload) {
        let mut session = ComparisonSession::new(TestId::new("login"));
        let nightly = run("r1", "nightly-1");
        let second = session.toggle(&nightly, SlotIndex::Two);
        session.settle(SettledResolution {
            request: second,
            outcome: ResolutionOutcome::Found(Box::new(payload)),
        });

        let placeholders = media_placeholders(&session);

        assert_eq!(placeholders.len(), 2);
        assert!(placeholders.iter().all(|placeholder| {
            placeholder.slot == SlotIndex::Two && placeholder.test_id.as_str() == "t-9"
        }));
    }
}
