//! Data models for runs and their feature/scenario result trees.
//!
//! The types here are the domain view of the results server. Wire shapes
//! live in [`api`] and convert into these types at the catalog boundary, so
//! the comparison core never sees raw JSON.

use std::fmt;

use chrono::{DateTime, Utc};

pub mod api;
mod rich_text;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use rich_text::RichText;

/// Identifier of a run within the results server.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunId(String);

impl RunId {
    /// Wraps a run identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RunId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Stable identifier naming "the same test" across runs.
///
/// For scenarios this is the scenario name; for log entries it is the
/// identifier the media source is keyed by.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TestId(String);

impl TestId {
    /// Wraps a test identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TestId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Execution status reported for runs, steps, and log entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Status {
    /// The item passed.
    Pass,
    /// The item failed.
    Fail,
    /// Any other status string reported by the server (e.g. `skip`).
    Other(String),
}

impl Status {
    /// Parses a wire status string. Matching is case-insensitive.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "pass" | "passed" => Self::Pass,
            "fail" | "failed" => Self::Fail,
            _ => Self::Other(value.to_owned()),
        }
    }

    /// Returns whether the status represents a pass.
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Returns the display label for the status.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Other(value) => value.as_str(),
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

/// BDD node kind of a top-level scenario node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BddType {
    /// A concrete test case.
    Scenario,
    /// A templated test case whose nested nodes are its generated examples.
    ScenarioOutline,
    /// Any other kind (`Background`, `Feature`, or missing); never matched.
    Other(String),
}

impl Default for BddType {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl BddType {
    /// Parses the wire `bddType` value.
    ///
    /// Both `"Scenario Outline"` and `"ScenarioOutline"` denote an outline.
    /// Only `"Scenario"` denotes a plain scenario; anything else is kept as
    /// [`BddType::Other`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.eq_ignore_ascii_case("ScenarioOutline") {
            Self::ScenarioOutline
        } else if compact.eq_ignore_ascii_case("Scenario") {
            Self::Scenario
        } else {
            Self::Other(value.to_owned())
        }
    }
}

/// A single run of a project's test suite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    /// Run identifier.
    pub id: RunId,
    /// Human-readable run name (e.g. `nightly-1`).
    pub name: String,
    /// Overall run status.
    pub status: Status,
    /// When the run started.
    pub start_time: DateTime<Utc>,
    /// Run duration in milliseconds, when reported.
    pub duration_ms: Option<u64>,
    /// Number of passed children, when reported.
    pub passed: Option<u64>,
    /// Number of failed children, when reported.
    pub failed: Option<u64>,
    /// Number of skipped children, when reported.
    pub skipped: Option<u64>,
}

/// One feature within a run's result tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureNode {
    /// Feature identifier.
    pub id: String,
    /// Top-level scenario and scenario-outline nodes, in server order.
    pub nodes: Vec<ScenarioNode>,
}

/// A scenario or scenario outline in a feature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioNode {
    /// Node identifier.
    pub id: String,
    /// Scenario name, compared against the target test identifier.
    pub name: String,
    /// Whether this node is a plain scenario or an outline.
    pub bdd_type: BddType,
    /// Scenario description markup.
    pub description: RichText,
    /// Error states attached to the scenario.
    pub error_states: Vec<String>,
    /// Duration in milliseconds.
    pub duration_ms: u64,
    /// Tags (category names) attached to the scenario.
    pub tags: Vec<String>,
    /// Steps of a plain scenario. Empty for outlines.
    pub steps: Vec<StepNode>,
    /// Generated examples of an outline. Empty for plain scenarios.
    pub nodes: Vec<ScenarioNode>,
}

/// A step inside a scenario.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepNode {
    /// Step identifier.
    pub id: String,
    /// Step outcome.
    pub status: Status,
    /// Step text.
    pub name: String,
    /// Log entries attached to the step.
    pub logs: Vec<LogEntry>,
}

/// A log entry attached to a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Identifier the entry's media is fetched by.
    pub test: TestId,
    /// Log entry status.
    pub status: Status,
    /// Detail markup, possibly empty.
    pub details: RichText,
    /// Media attached to the entry; `None` when the server sent `null`.
    pub media: Option<Vec<MediaEntry>>,
}

/// Reference to one media attachment of a log entry.
///
/// The body is not part of the tree; it is fetched on demand through the
/// media source using the owning entry's [`LogEntry::test`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaEntry {
    /// Optional label sent by the server (file name or media type).
    pub label: Option<String>,
}

/// Opaque encoded media payload returned by a media source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaBody(String);

impl MediaBody {
    /// Wraps an encoded media payload.
    #[must_use]
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Returns the encoded payload.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the payload length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the MIME type of a `data:` URI payload, if present.
    #[must_use]
    pub fn mime_type(&self) -> Option<&str> {
        let rest = self.0.strip_prefix("data:")?;
        let header = rest.split(',').next()?;
        let mime = header.split(';').next()?;
        (!mime.is_empty()).then_some(mime)
    }
}
