//! In-memory catalog backed by fixtures or a JSON export file.

use std::collections::HashMap;

use async_trait::async_trait;
use camino::Utf8Path;

use super::error::CatalogError;
use super::models::api::ApiCatalogExport;
use super::models::{FeatureNode, MediaBody, Run, RunId, TestId};
use super::{MediaSource, RunCatalog};

/// Catalog that serves runs, trees, and media held in memory.
///
/// An export holds a single project, so [`RunCatalog::list_runs`] ignores
/// the project argument.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRunCatalog {
    runs: Vec<Run>,
    trees: HashMap<RunId, Vec<FeatureNode>>,
    media: HashMap<TestId, MediaBody>,
}

impl InMemoryRunCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a run and its feature tree.
    #[must_use]
    pub fn with_run(mut self, run: Run, tree: Vec<FeatureNode>) -> Self {
        self.trees.insert(run.id.clone(), tree);
        self.runs.push(run);
        self
    }

    /// Adds a media body for a log entry test identifier.
    #[must_use]
    pub fn with_media(mut self, test_id: TestId, body: MediaBody) -> Self {
        self.media.insert(test_id, body);
        self
    }

    /// Builds a catalog from a decoded export.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Decode`] when a run carries an invalid start
    /// time.
    pub fn from_export(export: ApiCatalogExport) -> Result<Self, CatalogError> {
        let runs = export
            .runs
            .into_iter()
            .map(Run::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let trees = export
            .trees
            .into_iter()
            .map(|(run_id, nodes)| {
                let features = nodes.into_iter().map(FeatureNode::from).collect();
                (RunId::new(run_id), features)
            })
            .collect();
        let media = export
            .media
            .into_iter()
            .map(|(test_id, body)| (TestId::new(test_id), MediaBody::new(body)))
            .collect();

        Ok(Self { runs, trees, media })
    }

    /// Loads a catalog from a JSON export file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] when the file cannot be read and
    /// [`CatalogError::Decode`] when it is not a valid export.
    pub fn load(path: &Utf8Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path).map_err(|error| CatalogError::Io {
            message: format!("{path}: {error}"),
        })?;
        let export: ApiCatalogExport = serde_json::from_str(&contents)
            .map_err(|error| CatalogError::decode("catalog export", &error))?;
        let catalog = Self::from_export(export)?;
        tracing::info!(%path, runs = catalog.runs.len(), "loaded catalog export");
        Ok(catalog)
    }

    /// Returns the runs held by the catalog.
    #[must_use]
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }
}

#[async_trait]
impl RunCatalog for InMemoryRunCatalog {
    async fn list_runs(&self, _project: &str) -> Result<Vec<Run>, CatalogError> {
        Ok(self.runs.clone())
    }

    async fn fetch_tree(&self, run_id: &RunId) -> Result<Vec<FeatureNode>, CatalogError> {
        self.trees
            .get(run_id)
            .cloned()
            .ok_or_else(|| CatalogError::RunNotFound {
                run_id: run_id.to_string(),
            })
    }
}

#[async_trait]
impl MediaSource for InMemoryRunCatalog {
    async fn fetch_media_body(&self, test_id: &TestId) -> Result<MediaBody, CatalogError> {
        self.media
            .get(test_id)
            .cloned()
            .ok_or_else(|| CatalogError::MediaNotFound {
                test_id: test_id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use camino::Utf8PathBuf;
    use rstest::rstest;

    use super::*;
    use crate::catalog::models::test_support::{feature, run, scenario};

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime should build")
            .block_on(future)
    }

    #[rstest]
    fn unknown_run_is_reported() {
        let catalog = InMemoryRunCatalog::new();

        let error = block_on(catalog.fetch_tree(&RunId::new("missing"))).expect_err("should fail");

        assert_eq!(
            error,
            CatalogError::RunNotFound {
                run_id: "missing".to_owned()
            }
        );
    }

    #[rstest]
    fn trees_are_served_per_run() {
        let catalog = InMemoryRunCatalog::new()
            .with_run(
                run("r1", "nightly-1"),
                vec![feature("f1", vec![scenario("s1", "login", vec![])])],
            )
            .with_run(run("r2", "nightly-2"), Vec::new());

        let tree = block_on(catalog.fetch_tree(&RunId::new("r1"))).expect("tree");
        let runs = block_on(catalog.list_runs("ignored")).expect("runs");

        assert_eq!(tree.len(), 1);
        assert_eq!(runs.len(), 2);
    }

    #[rstest]
    fn export_file_round_trips_through_loader() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            "{}",
            serde_json::json!({
                "runs": [{ "id": "r1", "name": "nightly-1", "startTime": "2025-01-01T00:00:00Z" }],
                "trees": { "r1": [{ "id": "f1", "nodes": [{ "id": "s1", "name": "login", "bddType": "Scenario" }] }] },
                "media": { "t-1": "data:image/png;base64,AAAA" }
            })
        )
        .expect("write export");
        let path = Utf8PathBuf::from_path_buf(file.path().to_path_buf()).expect("utf-8 path");

        let catalog = InMemoryRunCatalog::load(&path).expect("export should load");
        let body = block_on(catalog.fetch_media_body(&TestId::new("t-1"))).expect("media");

        assert_eq!(catalog.runs().len(), 1);
        assert_eq!(body.mime_type(), Some("image/png"));
    }

    #[rstest]
    fn invalid_export_is_a_decode_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "{{\"runs\": 3}}").expect("write export");
        let path = Utf8PathBuf::from_path_buf(file.path().to_path_buf()).expect("utf-8 path");

        let error = InMemoryRunCatalog::load(&path).expect_err("load should fail");

        assert!(matches!(error, CatalogError::Decode { .. }));
    }
}
