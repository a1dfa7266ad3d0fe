use super::super::args::RunArgs;
use crate::exit_codes::SUCCESS;
use anyhow::Context;
use std::sync::Arc;
use verilint_core::config::AnalysisConfig;
use verilint_core::prompt::PromptBuilder;
use verilint_core::report::console::console_sink;
use verilint_core::reserved::ReservedWords;
use verilint_core::{BatchRunner, HttpInferenceClient};

pub(crate) async fn run(args: RunArgs) -> anyhow::Result<i32> {
    let cfg = resolve_config(&args)?;
    cfg.validate().context("invalid configuration")?;

    tracing::info!(
        endpoint = %cfg.inference.endpoint,
        model = %cfg.inference.model,
        root = %cfg.batch.benchmark_root.display(),
        "starting analysis"
    );

    let reserved = ReservedWords::load(&cfg.reserved_words_path);
    let client = HttpInferenceClient::new(cfg.inference.clone())
        .context("failed to create inference client")?;

    let mut runner = BatchRunner::new(cfg, PromptBuilder::new(reserved), Arc::new(client));
    if !args.quiet {
        runner = runner.with_progress(console_sink());
    }

    runner.run().await.context("failed to write report")?;
    Ok(SUCCESS)
}

/// defaults < `--config` file < `VERILINT_*` < flags.
pub(crate) fn resolve_config(args: &RunArgs) -> anyhow::Result<AnalysisConfig> {
    resolve_config_with(args, AnalysisConfig::with_env)
}

/// `env_layer` applies the `VERILINT_*` overrides; tests pass a fixed lookup.
fn resolve_config_with(
    args: &RunArgs,
    env_layer: impl FnOnce(AnalysisConfig) -> AnalysisConfig,
) -> anyhow::Result<AnalysisConfig> {
    let base = match &args.config {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };
    let mut cfg = env_layer(base);

    if let Some(endpoint) = &args.endpoint {
        cfg.inference.endpoint = endpoint.clone();
    }
    if let Some(model) = &args.model {
        cfg.inference.model = model.clone();
    }
    if let Some(max_tokens) = args.max_tokens {
        cfg.inference.max_tokens = max_tokens;
    }
    if let Some(temperature) = args.temperature {
        cfg.inference.temperature = temperature;
    }
    if let Some(timeout) = args.timeout {
        cfg.inference.timeout_secs = timeout;
    }
    if let Some(start) = args.start {
        cfg.batch.start_index = start;
    }
    if let Some(end) = args.end {
        cfg.batch.end_index = end;
    }
    if let Some(root) = &args.root {
        cfg.batch.benchmark_root = root.clone();
    }
    if let Some(report) = &args.report {
        cfg.report_path = report.clone();
    }
    if let Some(path) = &args.reserved_words {
        cfg.reserved_words_path = path.clone();
    }
    Ok(cfg)
}
