//! Structured telemetry events and sinks.
//!
//! Events capture how slot resolutions settle so slow catalogs and
//! frequently discarded requests can be spotted when debugging. Nothing is
//! transmitted anywhere; the JSONL sink appends to a local writer.

use std::io::{self, Write};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// A structured telemetry event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// Records how a slot resolution settled.
    ResolutionSettled {
        /// 1-based slot number.
        slot: u8,
        /// Run the resolution was issued for.
        run_id: String,
        /// Settlement label (`applied`, `not_found`, `fetch_failed`, `stale`).
        disposition: String,
        /// Milliseconds between issue and settlement.
        latency_ms: u64,
    },
    /// Records a media body fetch completing.
    MediaFetched {
        /// Test identifier the media is keyed by.
        test_id: String,
        /// Whether the fetch succeeded.
        success: bool,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Records telemetry events as JSON lines (JSONL) to a writer.
///
/// Write failures are logged and otherwise ignored.
#[derive(Debug)]
pub struct JsonlTelemetrySink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonlTelemetrySink<W> {
    /// Wraps a writer.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the sink and returns the writer.
    ///
    /// Returns `None` if the writer's lock was poisoned.
    #[must_use]
    pub fn into_inner(self) -> Option<W> {
        self.writer.into_inner().ok()
    }
}

impl<W: Write + Send> TelemetrySink for JsonlTelemetrySink<W> {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialised) = serde_json::to_string(&event) else {
            return;
        };

        if let Err(error) = self.write_line(&serialised) {
            tracing::warn!(%error, "failed to write telemetry event");
        }
    }
}

impl<W: Write + Send> JsonlTelemetrySink<W> {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| io::Error::other("telemetry writer lock poisoned"))?;
        writeln!(writer, "{line}")?;
        writer.flush()
    }
}
