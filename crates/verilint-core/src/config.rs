//! Run configuration.
//!
//! Precedence (lowest first): built-in defaults, YAML file, `VERILINT_*`
//! environment variables, then explicit overrides applied by the CLI.
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `VERILINT_ENDPOINT` | Inference endpoint URL |
//! | `VERILINT_MODEL` | Model identifier |
//! | `VERILINT_MAX_TOKENS` | Token budget per reply |
//! | `VERILINT_TEMPERATURE` | Sampling temperature |
//! | `VERILINT_TIMEOUT` | Request timeout in seconds (default: 30) |
//! | `VERILINT_START_INDEX` | First module index (inclusive) |
//! | `VERILINT_END_INDEX` | Last module index (exclusive) |
//! | `VERILINT_BENCHMARK_ROOT` | Root directory of the benchmark tree |
//! | `VERILINT_REPORT` | CSV report path |
//! | `VERILINT_RESERVED_WORDS` | Reserved-word resource path |

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;
use crate::module_id::Category;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434/api/chat";
pub const DEFAULT_MODEL: &str = "qwen3:14b";

/// Settings for the inference endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default)]
    pub temperature: f32,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Appended to the user message to suppress extended reasoning output.
    #[serde(default = "default_prompt_suffix")]
    pub prompt_suffix: String,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    2048
}

fn default_timeout() -> u64 {
    30
}

fn default_prompt_suffix() -> String {
    " /no_think".to_string()
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: 0.0,
            timeout_secs: default_timeout(),
            prompt_suffix: default_prompt_suffix(),
        }
    }
}

/// Which modules a run visits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    #[serde(default = "default_start_index")]
    pub start_index: u32,

    /// Exclusive.
    #[serde(default = "default_end_index")]
    pub end_index: u32,

    #[serde(default = "Category::defaults")]
    pub categories: Vec<Category>,

    #[serde(default = "default_benchmark_root")]
    pub benchmark_root: PathBuf,
}

fn default_start_index() -> u32 {
    1
}

fn default_end_index() -> u32 {
    31
}

fn default_benchmark_root() -> PathBuf {
    PathBuf::from("Static-Verilog-Analysis/Benchmark")
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            start_index: default_start_index(),
            end_index: default_end_index(),
            categories: Category::defaults(),
            benchmark_root: default_benchmark_root(),
        }
    }
}

impl BatchConfig {
    /// Number of modules a run will visit.
    pub fn module_count(&self) -> usize {
        let per_category = self.end_index.saturating_sub(self.start_index) as usize;
        per_category * self.categories.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub inference: InferenceConfig,

    #[serde(default)]
    pub batch: BatchConfig,

    #[serde(default = "default_report_path")]
    pub report_path: PathBuf,

    #[serde(default = "default_reserved_words_path")]
    pub reserved_words_path: PathBuf,
}

fn default_report_path() -> PathBuf {
    PathBuf::from("results.csv")
}

fn default_reserved_words_path() -> PathBuf {
    PathBuf::from("reservewords")
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            inference: InferenceConfig::default(),
            batch: BatchConfig::default(),
            report_path: default_report_path(),
            reserved_words_path: default_reserved_words_path(),
        }
    }
}

impl AnalysisConfig {
    /// Load a YAML config file. Missing keys fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self, serde_yaml::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }

    /// Apply `VERILINT_*` environment overrides on top of `self`.
    ///
    /// Unparseable numeric values are ignored, keeping the current value.
    pub fn with_env(self) -> Self {
        self.with_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup; `with_env` passes
    /// the process environment.
    pub fn with_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = var("VERILINT_ENDPOINT") {
            self.inference.endpoint = v;
        }
        if let Some(v) = var("VERILINT_MODEL") {
            self.inference.model = v;
        }
        if let Some(v) = parse_var(&var, "VERILINT_MAX_TOKENS") {
            self.inference.max_tokens = v;
        }
        if let Some(v) = parse_var(&var, "VERILINT_TEMPERATURE") {
            self.inference.temperature = v;
        }
        if let Some(v) = parse_var(&var, "VERILINT_TIMEOUT") {
            self.inference.timeout_secs = v;
        }
        if let Some(v) = parse_var(&var, "VERILINT_START_INDEX") {
            self.batch.start_index = v;
        }
        if let Some(v) = parse_var(&var, "VERILINT_END_INDEX") {
            self.batch.end_index = v;
        }
        if let Some(v) = var("VERILINT_BENCHMARK_ROOT") {
            self.batch.benchmark_root = PathBuf::from(v);
        }
        if let Some(v) = var("VERILINT_REPORT") {
            self.report_path = PathBuf::from(v);
        }
        if let Some(v) = var("VERILINT_RESERVED_WORDS") {
            self.reserved_words_path = PathBuf::from(v);
        }
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.inference.endpoint = endpoint.into();
        self
    }

    pub fn with_range(mut self, start_index: u32, end_index: u32) -> Self {
        self.batch.start_index = start_index;
        self.batch.end_index = end_index;
        self
    }

    pub fn with_benchmark_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.batch.benchmark_root = root.into();
        self
    }

    pub fn with_report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_path = path.into();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: String| Err(ConfigError::Invalid { message });

        if self.inference.endpoint.trim().is_empty() {
            return invalid("endpoint must not be empty".into());
        }
        if self.inference.model.trim().is_empty() {
            return invalid("model must not be empty".into());
        }
        if self.inference.timeout_secs == 0 {
            return invalid("timeout_secs must be greater than 0".into());
        }
        let t = self.inference.temperature;
        if !t.is_finite() || t < 0.0 {
            return invalid(format!("temperature must be a non-negative number, got {t}"));
        }
        if self.batch.start_index >= self.batch.end_index {
            return invalid(format!(
                "module range is empty: start_index {} must be below end_index {}",
                self.batch.start_index, self.batch.end_index
            ));
        }
        if self.batch.categories.is_empty() {
            return invalid("at least one category is required".into());
        }
        for c in &self.batch.categories {
            if c.prefix.is_empty() || c.folder.is_empty() {
                return invalid(format!(
                    "category prefix and folder must be non-empty (prefix={:?}, folder={:?})",
                    c.prefix, c.folder
                ));
            }
        }
        Ok(())
    }
}

/// Parse a numeric variable; a malformed value is logged and ignored.
fn parse_var<T: FromStr>(var: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = var(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(var = key, value = %raw, "ignoring unparseable value");
            None
        }
    }
}
