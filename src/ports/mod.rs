use std::path::Path;

use crate::application::report::RunReport;
use crate::domain::ast::SyntaxTree;
use crate::domain::mutant::MutantRecord;
use crate::error::Result;

/// Source text <-> syntax tree.
pub trait SyntaxBackend {
    fn parse(&self, source: &str) -> Result<SyntaxTree>;
    fn unparse(&self, tree: &SyntaxTree) -> String;
}

/// Destination for accepted mutants, called once per mutant in emission order.
pub trait MutantSink {
    fn emit(&mut self, record: &MutantRecord) -> Result<()>;
}

pub trait ReportExporter {
    fn export(&self, report: &RunReport, path: &Path) -> std::io::Result<()>;
}
