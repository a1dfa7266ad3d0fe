use clap::Args;
use std::path::PathBuf;

/// Flags override values from `--config` and `VERILINT_*` variables; the
/// variables themselves are applied by `AnalysisConfig::with_env`.
#[derive(Args, Clone, Default)]
pub struct RunArgs {
    /// Optional YAML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub endpoint: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub max_tokens: Option<u32>,

    #[arg(long)]
    pub temperature: Option<f32>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// First module index (inclusive)
    #[arg(long)]
    pub start: Option<u32>,

    /// Last module index (exclusive)
    #[arg(long)]
    pub end: Option<u32>,

    /// Root of the benchmark tree (contains simple/, medium/, complex/)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// CSV report path; an existing file is replaced
    #[arg(long)]
    pub report: Option<PathBuf>,

    #[arg(long)]
    pub reserved_words: Option<PathBuf>,

    /// Suppress per-module progress lines
    #[arg(long)]
    pub quiet: bool,
}
