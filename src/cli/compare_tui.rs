//! TUI mode for comparing two runs of one test.
//!
//! Loads the run list from the configured catalog, stores the comparison
//! context for `CompareApp::init()`, and runs the bubbletea-rs program.

use std::io::{self, Write};
use std::sync::Arc;

use bubbletea_rs::Program;

use runcompare::catalog::{HttpRunCatalog, InMemoryRunCatalog, MediaSource, RunCatalog};
use runcompare::config::CatalogSource;
use runcompare::telemetry::{JsonlTelemetrySink, NoopTelemetrySink, TelemetrySink};
use runcompare::tui::{CompareApp, CompareContext, set_compare_context};
use runcompare::RunCompareConfig;

use super::CliError;
use super::logging::open_append;

/// Catalog handles plus the project runs are listed for.
struct OpenedCatalog {
    catalog: Arc<dyn RunCatalog>,
    media: Arc<dyn MediaSource>,
    project: String,
}

/// Runs the comparison TUI.
///
/// # Errors
///
/// Returns an error if:
/// - The test identifier is missing
/// - Neither or both catalog sources are configured
/// - The run list cannot be loaded
/// - The TUI fails to initialise
pub async fn run(config: &RunCompareConfig) -> Result<(), CliError> {
    let target = config.require_test_id()?;
    let opened = open_catalog(config)?;

    let runs = config.filter_runs(opened.catalog.list_runs(&opened.project).await?);
    tracing::info!(%target, runs = runs.len(), "starting comparison");

    let context = CompareContext {
        runs,
        target,
        catalog: opened.catalog,
        media: opened.media,
        telemetry: telemetry_sink(config)?,
    };
    if !set_compare_context(context) {
        tracing::warn!("comparison context already set; keeping the existing one");
    }

    run_tui().await.map_err(|error| CliError::Interface {
        message: error.to_string(),
    })
}

fn open_catalog(config: &RunCompareConfig) -> Result<OpenedCatalog, CliError> {
    match config.catalog_source()? {
        CatalogSource::Http(http) => {
            let project = config.require_project()?.to_owned();
            let catalog = Arc::new(HttpRunCatalog::new(http)?);
            Ok(OpenedCatalog {
                catalog: Arc::clone(&catalog) as Arc<dyn RunCatalog>,
                media: catalog,
                project,
            })
        }
        CatalogSource::ExportFile(path) => {
            let catalog = Arc::new(InMemoryRunCatalog::load(&path)?);
            Ok(OpenedCatalog {
                catalog: Arc::clone(&catalog) as Arc<dyn RunCatalog>,
                media: catalog,
                project: config.project.clone().unwrap_or_default(),
            })
        }
    }
}

fn telemetry_sink(config: &RunCompareConfig) -> Result<Arc<dyn TelemetrySink>, CliError> {
    let Some(path) = config.telemetry_file.as_deref() else {
        return Ok(Arc::new(NoopTelemetrySink));
    };
    Ok(Arc::new(JsonlTelemetrySink::new(open_append(path)?)))
}

/// Runs the bubbletea-rs program with the `CompareApp` model.
async fn run_tui() -> Result<(), bubbletea_rs::Error> {
    let program = Program::<CompareApp>::builder().alt_screen(true).build()?;

    program.run().await?;

    io::stdout().flush().ok();

    Ok(())
}
