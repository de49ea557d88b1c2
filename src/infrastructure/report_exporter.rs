//! JSON Run Report Exporter
//!
//! Writes a `RunReport` as pretty-printed JSON.

use std::io::{Error, ErrorKind, Result};
use std::path::Path;

use crate::application::report::RunReport;
use crate::ports::ReportExporter;

pub struct JsonReportExporter;

impl JsonReportExporter {
    pub fn to_json(report: &RunReport) -> Result<String> {
        serde_json::to_string_pretty(report).map_err(|e| Error::new(ErrorKind::InvalidData, e))
    }
}

impl ReportExporter for JsonReportExporter {
    fn export(&self, report: &RunReport, path: &Path) -> Result<()> {
        let content = Self::to_json(report)?;
        std::fs::write(path, content)
    }
}
