pub mod console;
pub mod csv_report;
pub mod progress;

pub use csv_report::{CsvReport, ReportRow, HEADER, NO_LINE};
pub use progress::{ProgressEvent, ProgressSink};
