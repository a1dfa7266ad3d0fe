//! Batch orchestration: INIT → (per category, per index: ANALYZE → RECORD) → DONE.
//!
//! Modules are analysed strictly one after another. A module's failure is
//! recorded as an `ERROR` row and the run continues; only a report write
//! failure aborts it.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::client::InferenceClient;
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, ReportError};
use crate::interpret::interpret;
use crate::model::{DefectRecord, RunSummary};
use crate::module_id::{Category, ModuleId};
use crate::prompt::{source_lines, PromptBuilder};
use crate::report::{CsvReport, ProgressEvent, ProgressSink, ReportRow};
use crate::timer::Timer;

pub struct BatchRunner {
    config: AnalysisConfig,
    prompt: PromptBuilder,
    client: Arc<dyn InferenceClient>,
    progress: Option<ProgressSink>,
}

impl BatchRunner {
    pub fn new(
        config: AnalysisConfig,
        prompt: PromptBuilder,
        client: Arc<dyn InferenceClient>,
    ) -> Self {
        Self {
            config,
            prompt,
            client,
            progress: None,
        }
    }

    pub fn with_progress(mut self, sink: ProgressSink) -> Self {
        self.progress = Some(sink);
        self
    }

    fn emit(&self, event: ProgressEvent) {
        if let Some(sink) = &self.progress {
            sink(&event);
        }
    }

    /// Run every configured category over the configured index range.
    pub async fn run(&self) -> Result<RunSummary, ReportError> {
        let mut total_timer = Timer::new("total");
        total_timer.start();

        let report = CsvReport::create(&self.config.report_path)?;
        let batch = &self.config.batch;
        info!(
            report = %report.path().display(),
            provider = self.client.provider_name(),
            modules = batch.module_count(),
            "analysis run started"
        );
        self.emit(ProgressEvent::RunStarted {
            total: batch.module_count(),
        });

        let mut summary = RunSummary::default();
        for category in &batch.categories {
            self.run_category(category, &report, &mut summary).await?;
        }

        let (_, total_secs) = total_timer.end();
        summary.duration_secs = total_secs;
        info!(
            modules = summary.modules,
            defects = summary.defects_found,
            errors = summary.errors,
            duration_secs = total_secs,
            "analysis run finished"
        );
        self.emit(ProgressEvent::RunFinished {
            summary: summary.clone(),
            report: report.path().to_path_buf(),
        });
        Ok(summary)
    }

    async fn run_category(
        &self,
        category: &Category,
        report: &CsvReport,
        summary: &mut RunSummary,
    ) -> Result<(), ReportError> {
        let mut batch_timer = Timer::new(format!("{} batch", category.prefix));
        let timestamp = batch_timer.start();
        self.emit(ProgressEvent::BatchStarted {
            prefix: category.prefix.clone(),
            timestamp,
        });

        let batch = &self.config.batch;
        for index in batch.start_index..batch.end_index {
            let module = category.module(index);
            let record = self.process_module(&module, report).await?;
            summary.record(record.status());
        }

        let (_, duration_secs) = batch_timer.end();
        self.emit(ProgressEvent::BatchFinished {
            prefix: category.prefix.clone(),
            duration_secs,
            report: report.path().to_path_buf(),
        });
        Ok(())
    }

    /// Analyse, interpret and record one module. Exactly one row is appended.
    async fn process_module(
        &self,
        module: &ModuleId,
        report: &CsvReport,
    ) -> Result<DefectRecord, ReportError> {
        let name = module.name();
        let mut timer = Timer::new(name.clone());
        let timestamp = timer.start();
        self.emit(ProgressEvent::ModuleStarted {
            module: name.clone(),
            timestamp,
        });

        let outcome = self.analyze_module(module).await;
        if let Err(e) = &outcome {
            warn!(module = %name, kind = e.kind(), error = %e, "module analysis failed");
        }
        let record = interpret(&outcome);
        let (timestamp, duration_secs) = timer.end();

        report.append(&ReportRow {
            level: module.level(),
            file_name: &module.file_name(),
            record: &record,
        })?;

        let status = record.status();
        info!(
            module = %name,
            status = status.label(),
            defect_line = record.defect_line.as_deref().unwrap_or("-"),
            category = %record.category,
            duration_ms = (duration_secs * 1000.0) as u64,
            "module recorded"
        );
        let main_line = record
            .main_line
            .clone()
            .filter(|main| record.defect_line.as_deref() != Some(main.as_str()));
        self.emit(ProgressEvent::ModuleFinished {
            module: name,
            timestamp,
            duration_secs,
            status,
            main_line,
        });
        Ok(record)
    }

    /// Read the module's source, build the prompt and query the endpoint.
    pub async fn analyze_module(
        &self,
        module: &ModuleId,
    ) -> Result<serde_json::Value, AnalysisError> {
        let path = module.source_path(&self.config.batch.benchmark_root);
        let source = read_source(&path).await?;
        let prompt = self.prompt.build(&module.name(), &source_lines(&source));
        let body = self.client.complete(&prompt).await?;
        Ok(body)
    }
}

async fn read_source(path: &Path) -> Result<String, AnalysisError> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Err(AnalysisError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| AnalysisError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::FakeInferenceClient;
    use crate::reserved::ReservedWords;

    fn runner_for(root: &Path, client: Arc<FakeInferenceClient>) -> BatchRunner {
        let cfg = AnalysisConfig::default()
            .with_benchmark_root(root)
            .with_range(1, 2)
            .with_report_path(root.join("results.csv"));
        BatchRunner::new(cfg, PromptBuilder::new(ReservedWords::new("wire")), client)
    }

    #[tokio::test]
    async fn missing_file_never_reaches_the_client() {
        let dir = tempfile::tempdir().unwrap();
        let client = Arc::new(FakeInferenceClient::new());
        let runner = runner_for(dir.path(), client.clone());

        let module = Category::new("simple_", "simple").module(1);
        let err = runner.analyze_module(&module).await.unwrap_err();
        assert!(matches!(err, AnalysisError::FileNotFound { .. }));
        assert!(err.to_string().starts_with("File not found: "));
        assert!(err.to_string().ends_with("simple_1.v"));
        assert!(client.prompts().is_empty());
    }

    #[tokio::test]
    async fn prompt_carries_module_name_and_numbered_source() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("simple")).unwrap();
        std::fs::write(
            dir.path().join("simple/simple_1.v"),
            "module simple_1;\nendmodule\n",
        )
        .unwrap();
        let client = Arc::new(FakeInferenceClient::new());
        let runner = runner_for(dir.path(), client.clone());

        let module = Category::new("simple_", "simple").module(1);
        runner.analyze_module(&module).await.unwrap();
        let prompts = client.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("module named <simple_1>"));
        assert!(prompts[0].contains("1: module simple_1;\n2: endmodule\n"));
        assert!(prompts[0].contains("reserved words: wire"));
    }

    #[tokio::test]
    async fn progress_events_follow_processing_order() {
        let dir = tempfile::tempdir().unwrap();
        let client = Arc::new(FakeInferenceClient::new());
        let events = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink_events = events.clone();
        let runner = runner_for(dir.path(), client).with_progress(Arc::new(move |e: &ProgressEvent| {
            sink_events.lock().unwrap().push(e.clone());
        }));

        let summary = runner.run().await.unwrap();
        assert_eq!(summary.modules, 3);
        assert_eq!(summary.errors, 3);

        let events = events.lock().unwrap();
        assert!(matches!(events.first(), Some(ProgressEvent::RunStarted { total: 3 })));
        assert!(matches!(events.last(), Some(ProgressEvent::RunFinished { .. })));
        let started: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                ProgressEvent::ModuleStarted { module, .. } => Some(module.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(started, vec!["simple_1", "medium_1", "complex_1"]);
    }
}
