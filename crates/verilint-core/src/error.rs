//! Error types for the analysis pipeline.
//!
//! Per-module failures (`InferenceError`, `AnalysisError`) never abort a run;
//! the interpreter turns them into `ERROR` rows. Only `ConfigError` and
//! `ReportError` are fatal.

use std::path::PathBuf;

/// Failures of a single call to the inference endpoint.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InferenceError {
    /// Connection refused, DNS failure, timeout, or a request that could not be sent.
    #[error("Network request failed: {message}")]
    Network { message: String },

    /// The endpoint answered with a non-2xx status.
    #[error("Request failed with status code: {status}")]
    Server { status: u16 },

    /// Anything else, e.g. a 2xx body that is not JSON.
    #[error("Unexpected error: {message}")]
    Unexpected { message: String },
}

impl InferenceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network { .. } => "network",
            Self::Server { .. } => "server",
            Self::Unexpected { .. } => "unexpected",
        }
    }
}

impl From<reqwest::Error> for InferenceError {
    /// Only a decode failure is `Unexpected`; timeouts (including one that
    /// fires mid-body), connect and body errors are transport failures.
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() && !err.is_timeout() {
            Self::Unexpected {
                message: err.to_string(),
            }
        } else {
            Self::Network {
                message: err.to_string(),
            }
        }
    }
}

/// Failures while analysing one module, before or during inference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("File operation failed: {message}")]
    FileRead { path: PathBuf, message: String },

    #[error(transparent)]
    Inference(#[from] InferenceError),

    /// The endpoint answered, but no message content could be located.
    #[error("Unknown result format")]
    UnknownFormat,
}

impl AnalysisError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } => "file_not_found",
            Self::FileRead { .. } => "file_read",
            Self::Inference(inner) => inner.kind(),
            Self::UnknownFormat => "unknown_format",
        }
    }
}

/// Invalid configuration (file, environment or flags).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid config: {message}")]
    Invalid { message: String },
}

/// The report file could not be created or appended to. Aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("report io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("report csv error on {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
