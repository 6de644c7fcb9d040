//! Wire shapes of the results server and the JSON export file.
//!
//! Every result-tree level uses the same recursive node shape: a feature's
//! `nodes` are scenarios, an outline's `nodes` are its generated scenarios,
//! and a plain scenario's `nodes` are its steps. The conversions below pick
//! the right interpretation from the node's `bddType`.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::{
    BddType, FeatureNode, LogEntry, MediaEntry, RichText, Run, RunId, ScenarioNode, Status,
    StepNode, TestId,
};
use crate::catalog::error::CatalogError;

/// Paged listing envelope used by every collection endpoint.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiPage<T> {
    /// Items on this page.
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
}

/// Identifier that may arrive as a string or a number.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ApiId {
    /// Textual identifier.
    Text(String),
    /// Numeric identifier.
    Number(u64),
}

impl Default for ApiId {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl ApiId {
    fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

/// Timestamp that may arrive as RFC 3339 text or epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ApiTimestamp {
    /// Milliseconds since the Unix epoch.
    Millis(i64),
    /// RFC 3339 timestamp.
    Text(String),
}

impl ApiTimestamp {
    fn to_datetime(&self) -> Result<DateTime<Utc>, CatalogError> {
        match self {
            Self::Millis(millis) => Utc
                .timestamp_millis_opt(*millis)
                .single()
                .ok_or_else(|| CatalogError::decode("run start time", &millis)),
            Self::Text(text) => DateTime::parse_from_rfc3339(text)
                .map(|time| time.with_timezone(&Utc))
                .map_err(|error| CatalogError::decode("run start time", &error)),
        }
    }
}

/// Run entry as returned by the runs listing.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRun {
    /// Run identifier.
    pub id: ApiId,
    /// Run name.
    #[serde(default)]
    pub name: String,
    /// Run status string.
    #[serde(default)]
    pub status: Option<String>,
    /// Start time.
    pub start_time: ApiTimestamp,
    /// Duration in milliseconds.
    #[serde(default)]
    pub duration: Option<u64>,
    /// Passed children.
    #[serde(default)]
    pub pass_child_length: Option<u64>,
    /// Failed children.
    #[serde(default)]
    pub fail_child_length: Option<u64>,
    /// Skipped children.
    #[serde(default)]
    pub skip_child_length: Option<u64>,
}

impl TryFrom<ApiRun> for Run {
    type Error = CatalogError;

    fn try_from(value: ApiRun) -> Result<Self, Self::Error> {
        let start_time = value.start_time.to_datetime()?;
        Ok(Self {
            id: RunId::new(value.id.into_string()),
            name: value.name,
            status: value.status.as_deref().map(Status::parse).unwrap_or_default(),
            start_time,
            duration_ms: value.duration,
            passed: value.pass_child_length,
            failed: value.fail_child_length,
            skipped: value.skip_child_length,
        })
    }
}

/// Feature reference returned by the per-run features listing.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiFeatureRef {
    /// Feature identifier.
    pub id: ApiId,
}

impl ApiFeatureRef {
    /// Returns the feature identifier as a string.
    #[must_use]
    pub fn into_id(self) -> String {
        self.id.into_string()
    }
}

/// Recursive result-tree node.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTestNode {
    /// Node identifier.
    #[serde(default)]
    pub id: ApiId,
    /// Node name.
    #[serde(default)]
    pub name: String,
    /// BDD node kind (`Feature`, `Scenario`, `Scenario Outline`, ...).
    #[serde(default)]
    pub bdd_type: Option<String>,
    /// Description markup.
    #[serde(default)]
    pub description: Option<String>,
    /// Error states.
    #[serde(default)]
    pub error_states: Vec<String>,
    /// Duration in milliseconds.
    #[serde(default)]
    pub duration: Option<u64>,
    /// Tags.
    #[serde(default)]
    pub category_name_list: Vec<String>,
    /// Status string, used by steps.
    #[serde(default)]
    pub status: Option<String>,
    /// Child nodes.
    #[serde(default)]
    pub nodes: Vec<ApiTestNode>,
    /// Log entries, used by steps.
    #[serde(default)]
    pub logs: Vec<ApiLogEntry>,
}

/// Log entry attached to a step.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiLogEntry {
    /// Identifier used to fetch the entry's media.
    #[serde(default)]
    pub test: String,
    /// Entry status.
    #[serde(default)]
    pub status: Option<String>,
    /// Detail markup.
    #[serde(default)]
    pub details: Option<String>,
    /// Media attachments, or `null`.
    #[serde(default)]
    pub media: Option<Vec<serde_json::Value>>,
}

impl From<ApiTestNode> for FeatureNode {
    fn from(value: ApiTestNode) -> Self {
        Self {
            id: value.id.into_string(),
            nodes: value.nodes.into_iter().map(ScenarioNode::from).collect(),
        }
    }
}

impl From<ApiTestNode> for ScenarioNode {
    fn from(value: ApiTestNode) -> Self {
        let bdd_type = value
            .bdd_type
            .as_deref()
            .map(BddType::parse)
            .unwrap_or_default();
        let (steps, nodes) = match &bdd_type {
            BddType::ScenarioOutline => (
                Vec::new(),
                value.nodes.into_iter().map(Self::from).collect(),
            ),
            BddType::Scenario | BddType::Other(_) => (
                value.nodes.into_iter().map(StepNode::from).collect(),
                Vec::new(),
            ),
        };

        Self {
            id: value.id.into_string(),
            name: value.name,
            bdd_type,
            description: RichText::new(value.description.unwrap_or_default()),
            error_states: value.error_states,
            duration_ms: value.duration.unwrap_or_default(),
            tags: value.category_name_list,
            steps,
            nodes,
        }
    }
}

impl From<ApiTestNode> for StepNode {
    fn from(value: ApiTestNode) -> Self {
        Self {
            id: value.id.into_string(),
            status: value.status.as_deref().map(Status::parse).unwrap_or_default(),
            name: value.name,
            logs: value.logs.into_iter().map(LogEntry::from).collect(),
        }
    }
}

impl From<ApiLogEntry> for LogEntry {
    fn from(value: ApiLogEntry) -> Self {
        Self {
            test: TestId::new(value.test),
            status: value.status.as_deref().map(Status::parse).unwrap_or_default(),
            details: RichText::new(value.details.unwrap_or_default()),
            media: value
                .media
                .map(|entries| entries.iter().map(media_entry).collect()),
        }
    }
}

fn media_entry(value: &serde_json::Value) -> MediaEntry {
    let label = match value {
        serde_json::Value::String(text) => Some(text.clone()),
        serde_json::Value::Object(fields) => ["name", "fileName", "type"]
            .iter()
            .find_map(|key| fields.get(*key).and_then(serde_json::Value::as_str))
            .map(str::to_owned),
        _ => None,
    };
    MediaEntry { label }
}

/// Offline catalog export: runs, their trees, and media bodies.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiCatalogExport {
    /// Runs of the exported project.
    #[serde(default)]
    pub runs: Vec<ApiRun>,
    /// Feature-level nodes keyed by run identifier.
    #[serde(default)]
    pub trees: BTreeMap<String, Vec<ApiTestNode>>,
    /// Encoded media bodies keyed by log entry test identifier.
    #[serde(default)]
    pub media: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn scenario_nodes_become_steps() {
        let node: ApiTestNode = serde_json::from_value(json!({
            "id": "s1",
            "name": "login",
            "bddType": "Scenario",
            "categoryNameList": ["smoke"],
            "duration": 1200,
            "nodes": [
                { "id": "st1", "name": "open page", "status": "pass", "logs": [] }
            ]
        }))
        .expect("node should deserialise");

        let scenario = ScenarioNode::from(node);

        assert_eq!(scenario.tags, vec!["smoke".to_owned()]);
        assert_eq!(scenario.duration_ms, 1200);
        assert!(scenario.nodes.is_empty());
        let step = scenario.steps.first().expect("one step");
        assert_eq!(step.name, "open page");
        assert_eq!(step.status, Status::Pass);
    }

    #[test]
    fn outline_nodes_become_nested_scenarios() {
        let node: ApiTestNode = serde_json::from_value(json!({
            "id": "o1",
            "name": "checkout",
            "bddType": "Scenario Outline",
            "nodes": [
                {
                    "id": "o1-2",
                    "name": "checkout [row 2]",
                    "bddType": "Scenario",
                    "nodes": [{ "id": "st", "name": "pay", "status": "fail" }]
                }
            ]
        }))
        .expect("node should deserialise");

        let outline = ScenarioNode::from(node);

        assert_eq!(outline.bdd_type, BddType::ScenarioOutline);
        assert!(outline.steps.is_empty());
        let example = outline.nodes.first().expect("one example");
        assert_eq!(example.name, "checkout [row 2]");
        assert_eq!(example.steps.len(), 1);
    }

    #[test]
    fn background_and_untyped_nodes_are_not_scenarios() {
        let background: ApiTestNode = serde_json::from_value(json!({
            "id": "b1",
            "name": "login",
            "bddType": "Background",
            "nodes": [{ "id": "st", "name": "seed data", "status": "pass" }]
        }))
        .expect("node should deserialise");
        let untyped: ApiTestNode = serde_json::from_value(json!({ "id": "u1", "name": "login" }))
            .expect("node should deserialise");

        let converted = ScenarioNode::from(background);

        assert_eq!(converted.bdd_type, BddType::Other("Background".to_owned()));
        assert_eq!(converted.steps.len(), 1);
        assert_eq!(ScenarioNode::from(untyped).bdd_type, BddType::default());
    }

    #[test]
    fn log_media_null_is_preserved() {
        let entry: ApiLogEntry = serde_json::from_value(json!({
            "test": "t-1",
            "status": "pass",
            "details": "",
            "media": null
        }))
        .expect("entry should deserialise");

        assert!(LogEntry::from(entry).media.is_none());
    }

    #[test]
    fn log_media_labels_are_extracted() {
        let entry: ApiLogEntry = serde_json::from_value(json!({
            "test": "t-1",
            "media": ["screenshot.png", { "type": "image/png" }, 7]
        }))
        .expect("entry should deserialise");

        let media = LogEntry::from(entry).media.expect("media present");
        let labels: Vec<Option<&str>> = media.iter().map(|m| m.label.as_deref()).collect();
        assert_eq!(labels, vec![Some("screenshot.png"), Some("image/png"), None]);
    }

    #[test]
    fn run_start_time_accepts_epoch_millis() {
        let run: ApiRun = serde_json::from_value(json!({
            "id": 7,
            "name": "nightly-7",
            "status": "fail",
            "startTime": 1_700_000_000_000_i64
        }))
        .expect("run should deserialise");

        let converted = Run::try_from(run).expect("run should convert");

        assert_eq!(converted.id.as_str(), "7");
        assert_eq!(converted.start_time.timestamp(), 1_700_000_000);
        assert_eq!(converted.status, Status::Fail);
    }

    #[test]
    fn run_start_time_rejects_garbage() {
        let run: ApiRun = serde_json::from_value(json!({
            "id": "r1",
            "name": "nightly-1",
            "startTime": "yesterday"
        }))
        .expect("run should deserialise");

        let error = Run::try_from(run).expect_err("conversion should fail");

        assert!(matches!(error, CatalogError::Decode { .. }));
    }
}
