//! Append-only CSV report.
//!
//! The file is recreated at the start of a run and then opened, appended and
//! closed once per row, so an interrupted run still leaves a parseable file.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::ReportError;
use crate::model::DefectRecord;

pub const HEADER: [&str; 5] = [
    "Level",
    "File_Name",
    "Defect_Line",
    "Defect_Type",
    "Defect_Description",
];

/// Written in the `Defect_Line` column when no line was reported.
pub const NO_LINE: &str = "N/A";

/// One report row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow<'a> {
    pub level: &'a str,
    pub file_name: &'a str,
    pub record: &'a DefectRecord,
}

impl ReportRow<'_> {
    pub fn fields(&self) -> [&str; 5] {
        [
            self.level,
            self.file_name,
            self.record.defect_line.as_deref().unwrap_or(NO_LINE),
            &self.record.category,
            &self.record.description,
        ]
    }
}

#[derive(Debug, Clone)]
pub struct CsvReport {
    path: PathBuf,
}

impl CsvReport {
    /// Remove any previous report and start a new one holding only the header.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, ReportError> {
        let path = path.into();
        if path.exists() {
            std::fs::remove_file(&path).map_err(|source| ReportError::Io {
                path: path.clone(),
                source,
            })?;
            info!(path = %path.display(), "removed existing report");
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| ReportError::Io {
                path: path.clone(),
                source,
            })?;
        }
        let report = Self { path };
        report.write_record(HEADER)?;
        Ok(report)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, row: &ReportRow<'_>) -> Result<(), ReportError> {
        self.write_record(row.fields())
    }

    fn write_record(&self, fields: [&str; 5]) -> Result<(), ReportError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| ReportError::Io {
                path: self.path.clone(),
                source,
            })?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer
            .write_record(fields)
            .map_err(|source| ReportError::Csv {
                path: self.path.clone(),
                source,
            })?;
        writer.flush().map_err(|source| ReportError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(path: &Path) -> Vec<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .unwrap();
        reader
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect()
    }

    #[test]
    fn create_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let report = CsvReport::create(dir.path().join("results.csv")).unwrap();
        assert_eq!(rows(report.path()), vec![HEADER.map(String::from).to_vec()]);
    }

    #[test]
    fn absent_line_is_written_as_na_and_commas_are_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let report = CsvReport::create(dir.path().join("results.csv")).unwrap();
        let record = DefectRecord::error("File not found: a, b.v");
        report
            .append(&ReportRow {
                level: "simple",
                file_name: "simple_1.v",
                record: &record,
            })
            .unwrap();

        let raw = std::fs::read_to_string(report.path()).unwrap();
        assert!(raw.contains("\"File not found: a, b.v\""), "{raw}");
        let all = rows(report.path());
        assert_eq!(
            all[1],
            vec!["simple", "simple_1.v", "N/A", "ERROR", "File not found: a, b.v"]
        );
    }

    #[test]
    fn create_discards_previous_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("results.csv");
        let report = CsvReport::create(&path).unwrap();
        let record = DefectRecord::no_defects();
        let row = ReportRow {
            level: "medium",
            file_name: "medium_2.v",
            record: &record,
        };
        report.append(&row).unwrap();
        report.append(&row).unwrap();
        assert_eq!(rows(&path).len(), 3);

        CsvReport::create(&path).unwrap();
        assert_eq!(rows(&path).len(), 1);
    }
}
