//! Screens benchmark Verilog modules for functional defects by asking an
//! LLM inference endpoint and recording one CSV row per module.

pub mod client;
pub mod config;
pub mod engine;
pub mod error;
pub mod interpret;
pub mod model;
pub mod module_id;
pub mod prompt;
pub mod report;
pub mod reserved;
pub mod taxonomy;
pub mod timer;

pub use client::{HttpInferenceClient, InferenceClient};
pub use config::AnalysisConfig;
pub use engine::BatchRunner;
pub use error::{AnalysisError, ConfigError, InferenceError, ReportError};
pub use model::{DefectRecord, ModuleStatus, RunSummary};
