//! Test helpers for constructing result-tree fixtures.
//!
//! # Examples
//!
//! ```
//! use runcompare::catalog::models::test_support::{feature, outline, run, scenario, step};
//!
//! let tree = vec![feature("f1", vec![
//!     scenario("s1", "login", vec![step("st1", "open page", "pass")]),
//!     outline("o1", "checkout", vec![scenario("o1-1", "checkout [row 1]", vec![])]),
//! ])];
//! let nightly = run("r1", "nightly-1");
//! assert_eq!(tree.len(), 1);
//! assert_eq!(nightly.name, "nightly-1");
//! ```

use chrono::{TimeZone, Utc};

use super::{
    BddType, FeatureNode, LogEntry, MediaEntry, RichText, Run, RunId, ScenarioNode, Status,
    StepNode, TestId,
};

/// Start time used by [`run`]: 2025-01-01T00:00:00Z.
pub const DEFAULT_RUN_START_SECS: i64 = 1_735_689_600;

/// Constructs a passing run with the given id and name.
///
/// Runs built with this helper start at [`DEFAULT_RUN_START_SECS`].
#[must_use]
pub fn run(id: &str, name: &str) -> Run {
    run_started_at(id, name, DEFAULT_RUN_START_SECS)
}

/// Constructs a passing run starting at the given Unix timestamp.
#[must_use]
pub fn run_started_at(id: &str, name: &str, start_secs: i64) -> Run {
    Run {
        id: RunId::new(id),
        name: name.to_owned(),
        status: Status::Pass,
        start_time: Utc
            .timestamp_opt(start_secs, 0)
            .single()
            .unwrap_or_default(),
        duration_ms: None,
        passed: None,
        failed: None,
        skipped: None,
    }
}

/// Constructs a feature holding the given scenario nodes.
#[must_use]
pub fn feature(id: &str, nodes: Vec<ScenarioNode>) -> FeatureNode {
    FeatureNode {
        id: id.to_owned(),
        nodes,
    }
}

/// Constructs a plain scenario with the given steps.
#[must_use]
pub fn scenario(id: &str, name: &str, steps: Vec<StepNode>) -> ScenarioNode {
    ScenarioNode {
        id: id.to_owned(),
        name: name.to_owned(),
        bdd_type: BddType::Scenario,
        steps,
        ..ScenarioNode::default()
    }
}

/// Constructs a scenario outline with the given generated examples.
#[must_use]
pub fn outline(id: &str, name: &str, examples: Vec<ScenarioNode>) -> ScenarioNode {
    ScenarioNode {
        id: id.to_owned(),
        name: name.to_owned(),
        bdd_type: BddType::ScenarioOutline,
        nodes: examples,
        ..ScenarioNode::default()
    }
}

/// Constructs a step without log entries.
#[must_use]
pub fn step(id: &str, name: &str, status: &str) -> StepNode {
    StepNode {
        id: id.to_owned(),
        status: Status::parse(status),
        name: name.to_owned(),
        logs: Vec::new(),
    }
}

/// Constructs a log entry with detail markup and `media_count` attachments.
///
/// A `media_count` of zero produces `media: None`, matching a server that
/// sends `null` for entries without attachments.
#[must_use]
pub fn log_entry(test: &str, details: &str, media_count: usize) -> LogEntry {
    let media = (media_count > 0).then(|| vec![MediaEntry::default(); media_count]);
    LogEntry {
        test: TestId::new(test),
        status: Status::Pass,
        details: RichText::new(details),
        media,
    }
}
