pub mod report;

pub use report::{lab_report_schema, LabReportRecord};
