//! Search of a run's feature tree for the scenario matching a test identifier.
//!
//! Features are walked in order. Within a feature a plain scenario whose
//! name matches is returned at once. A match inside a scenario outline's
//! generated examples is held as the feature's candidate and only returned
//! once the feature is exhausted without a plain match.

use chrono::{DateTime, Utc};

use crate::catalog::models::{
    BddType, FeatureNode, RichText, Run, RunId, ScenarioNode, StepNode, TestId,
};

/// Token distinguishing repeated resolutions for the same slot.
pub type ResolutionCount = u64;

/// Run identity attached to a resolved payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunAttribution {
    /// Run the payload was resolved from.
    pub run_id: RunId,
    /// Human-readable run name.
    pub run_name: String,
    /// When the run started.
    pub run_start_time: DateTime<Utc>,
}

impl From<&Run> for RunAttribution {
    fn from(run: &Run) -> Self {
        Self {
            run_id: run.id.clone(),
            run_name: run.name.clone(),
            run_start_time: run.start_time,
        }
    }
}

/// Normalised scenario detail shown in a comparison slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioPayload {
    /// Resolution token supplied by the caller.
    pub count: ResolutionCount,
    /// Identifier of the matched scenario node.
    pub id: String,
    /// Scenario name.
    pub name: String,
    /// Description markup, kept verbatim.
    pub description: RichText,
    /// Error states attached to the scenario.
    pub error_states: Vec<String>,
    /// Duration in milliseconds.
    pub duration_ms: u64,
    /// Steps in execution order.
    pub steps: Vec<StepNode>,
    /// Scenario tags.
    pub tags: Vec<String>,
    /// Run the scenario was resolved from.
    pub run_id: RunId,
    /// Name of that run.
    pub run_name: String,
    /// Start time of that run.
    pub run_start_time: DateTime<Utc>,
}

impl ScenarioPayload {
    /// Builds a payload from a matched node and its run attribution.
    #[must_use]
    pub fn from_node(
        node: &ScenarioNode,
        attribution: &RunAttribution,
        count: ResolutionCount,
    ) -> Self {
        Self {
            count,
            id: node.id.clone(),
            name: node.name.clone(),
            description: node.description.clone(),
            error_states: node.error_states.clone(),
            duration_ms: node.duration_ms,
            steps: node.steps.clone(),
            tags: node.tags.clone(),
            run_id: attribution.run_id.clone(),
            run_name: attribution.run_name.clone(),
            run_start_time: attribution.run_start_time,
        }
    }
}

/// Where in a tree a match was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location<'a> {
    /// Identifier of the feature holding the match.
    pub feature_id: &'a str,
    /// Whether the match is a generated example of a scenario outline.
    pub from_outline: bool,
    /// The matched node.
    pub node: &'a ScenarioNode,
}

/// Finds the scenario named `target` in `tree`.
#[must_use]
pub fn locate<'a>(tree: &'a [FeatureNode], target: &TestId) -> Option<Location<'a>> {
    tree.iter().find_map(|feature| locate_in_feature(feature, target.as_str()))
}

fn locate_in_feature<'a>(feature: &'a FeatureNode, target: &str) -> Option<Location<'a>> {
    let mut outline_candidate: Option<&ScenarioNode> = None;

    for node in &feature.nodes {
        match &node.bdd_type {
            BddType::ScenarioOutline => {
                if outline_candidate.is_none() {
                    outline_candidate = node.nodes.iter().find(|example| example.name == target);
                }
            }
            BddType::Scenario => {
                if node.name == target {
                    return Some(Location {
                        feature_id: &feature.id,
                        from_outline: false,
                        node,
                    });
                }
            }
            BddType::Other(_) => {}
        }
    }

    outline_candidate.map(|node| Location {
        feature_id: &feature.id,
        from_outline: true,
        node,
    })
}

/// Resolves the payload for `target` in `tree`, or `None` when no scenario
/// matches.
#[must_use]
pub fn resolve(
    tree: &[FeatureNode],
    target: &TestId,
    attribution: &RunAttribution,
    count: ResolutionCount,
) -> Option<ScenarioPayload> {
    let location = locate(tree, target)?;
    tracing::trace!(
        run_id = %attribution.run_id,
        feature_id = location.feature_id,
        from_outline = location.from_outline,
        "located scenario"
    );
    Some(ScenarioPayload::from_node(location.node, attribution, count))
}
