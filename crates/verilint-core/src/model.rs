use std::fmt;

use serde::{Deserialize, Serialize};

use crate::taxonomy::{CATEGORY_ERROR, CATEGORY_NONE, CATEGORY_UNKNOWN};

/// Outcome of analysing one module. Created once, written as one report row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefectRecord {
    /// Single line number, or a hyphen-joined list for multi-defect replies.
    pub defect_line: Option<String>,
    pub category: String,
    pub description: String,
    /// The model's stated main defect line. Not part of the report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_line: Option<String>,
}

impl DefectRecord {
    pub fn no_defects() -> Self {
        Self {
            defect_line: None,
            category: CATEGORY_NONE.to_string(),
            description: "No defects found".to_string(),
            main_line: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            defect_line: None,
            category: CATEGORY_ERROR.to_string(),
            description: message.into(),
            main_line: None,
        }
    }

    pub fn unknown_format() -> Self {
        Self {
            defect_line: None,
            category: CATEGORY_UNKNOWN.to_string(),
            description: "Unknown result format".to_string(),
            main_line: None,
        }
    }

    pub fn status(&self) -> ModuleStatus {
        if self.defect_line.is_some() {
            ModuleStatus::DefectFound
        } else if self.category == CATEGORY_NONE {
            ModuleStatus::NoDefects
        } else {
            ModuleStatus::Error
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModuleStatus {
    DefectFound,
    NoDefects,
    Error,
}

impl ModuleStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::DefectFound => "DEFECT FOUND",
            Self::NoDefects => "NO DEFECTS",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for ModuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Totals for one run, printed after the last batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub modules: usize,
    pub defects_found: usize,
    pub no_defects: usize,
    pub errors: usize,
    pub duration_secs: f64,
}

impl RunSummary {
    pub fn record(&mut self, status: ModuleStatus) {
        self.modules += 1;
        match status {
            ModuleStatus::DefectFound => self.defects_found += 1,
            ModuleStatus::NoDefects => self.no_defects += 1,
            ModuleStatus::Error => self.errors += 1,
        }
    }
}
