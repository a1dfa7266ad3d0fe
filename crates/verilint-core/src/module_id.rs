//! Module identifiers and their mapping onto the benchmark tree.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A benchmark category: module-name prefix plus the folder holding its files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// e.g. `simple_`
    pub prefix: String,
    /// e.g. `simple`
    pub folder: String,
}

impl Category {
    pub fn new(prefix: impl Into<String>, folder: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            folder: folder.into(),
        }
    }

    pub fn defaults() -> Vec<Category> {
        vec![
            Category::new("simple_", "simple"),
            Category::new("medium_", "medium"),
            Category::new("complex_", "complex"),
        ]
    }

    /// Level written to the report: the prefix without trailing underscores.
    pub fn level(&self) -> &str {
        self.prefix.trim_end_matches('_')
    }

    pub fn module(&self, index: u32) -> ModuleId {
        ModuleId {
            category: self.clone(),
            index,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleId {
    pub category: Category,
    pub index: u32,
}

impl ModuleId {
    /// `<prefix><index>`, e.g. `simple_7`.
    pub fn name(&self) -> String {
        format!("{}{}", self.category.prefix, self.index)
    }

    pub fn file_name(&self) -> String {
        format!("{}.v", self.name())
    }

    pub fn level(&self) -> &str {
        self.category.level()
    }

    /// `<root>/<folder>/<prefix><index>.v`
    pub fn source_path(&self, benchmark_root: &Path) -> PathBuf {
        benchmark_root
            .join(&self.category.folder)
            .join(self.file_name())
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.category.prefix, self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_maps_to_benchmark_path() {
        let m = Category::new("medium_", "medium").module(12);
        assert_eq!(m.name(), "medium_12");
        assert_eq!(m.file_name(), "medium_12.v");
        assert_eq!(m.level(), "medium");
        assert_eq!(
            m.source_path(Path::new("bench")),
            PathBuf::from("bench/medium/medium_12.v")
        );
        assert_eq!(m.to_string(), "medium_12");
    }

    #[test]
    fn level_strips_every_trailing_underscore() {
        assert_eq!(Category::new("complex__", "c").level(), "complex");
        assert_eq!(Category::new("plain", "p").level(), "plain");
    }
}
