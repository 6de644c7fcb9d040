//! Read-only access to runs, their result trees, and media bodies.
//!
//! This module provides trait-based seams for the external results server.
//! The comparison core depends only on the traits; [`HttpRunCatalog`]
//! talks to a live server and [`InMemoryRunCatalog`] serves a JSON export
//! or test fixtures.

use async_trait::async_trait;

pub mod error;
pub mod http;
pub mod memory;
pub mod models;

pub use error::CatalogError;
pub use http::{HttpCatalogConfig, HttpRunCatalog};
pub use memory::InMemoryRunCatalog;
pub use models::{
    BddType, FeatureNode, LogEntry, MediaBody, MediaEntry, RichText, Run, RunId, ScenarioNode,
    Status, StepNode, TestId,
};

/// Catalog that can list runs and load a run's feature tree.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RunCatalog: Send + Sync {
    /// Lists the runs of a project, in server order.
    async fn list_runs(&self, project: &str) -> Result<Vec<Run>, CatalogError>;

    /// Loads the full feature/scenario tree of a run.
    async fn fetch_tree(&self, run_id: &RunId) -> Result<Vec<FeatureNode>, CatalogError>;
}

/// Source of encoded media bodies for log entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// Fetches the encoded media body attached to a log entry.
    async fn fetch_media_body(&self, test_id: &TestId) -> Result<MediaBody, CatalogError>;
}
