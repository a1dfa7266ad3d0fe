//! Progress reporting. The runner emits events in processing order; the
//! console layer (or a test) consumes them via a sink.

use std::path::PathBuf;
use std::sync::Arc;

use crate::model::{ModuleStatus, RunSummary};

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    RunStarted {
        total: usize,
    },
    BatchStarted {
        prefix: String,
        timestamp: String,
    },
    ModuleStarted {
        module: String,
        timestamp: String,
    },
    ModuleFinished {
        module: String,
        timestamp: String,
        duration_secs: f64,
        status: ModuleStatus,
        main_line: Option<String>,
    },
    BatchFinished {
        prefix: String,
        duration_secs: f64,
        report: PathBuf,
    },
    RunFinished {
        summary: RunSummary,
        report: PathBuf,
    },
}

/// Sink for progress events. Called synchronously by the runner.
pub type ProgressSink = Arc<dyn Fn(&ProgressEvent) + Send + Sync>;
