// Infrastructure implementations for Mutant Forge.

pub mod config_loader;
pub mod mutant_writer;
pub mod report_exporter;
pub mod source_loader;

use crate::domain::ast::SyntaxTree;
use crate::domain::mutant::MutantRecord;
use crate::error::Result;
use crate::ports::{MutantSink, SyntaxBackend};

pub use config_loader::load_settings;
pub use mutant_writer::FileMutantWriter;
pub use report_exporter::JsonReportExporter;
pub use source_loader::{SourceLoader, SubjectSource};

/// Rust sources: `syn` parses, `prettyplease` renders.
#[derive(Debug, Clone, Copy, Default)]
pub struct SynBackend;

impl SyntaxBackend for SynBackend {
    fn parse(&self, source: &str) -> Result<SyntaxTree> {
        Ok(syn::parse_file(source)?)
    }

    fn unparse(&self, tree: &SyntaxTree) -> String {
        prettyplease::unparse(tree)
    }
}

/// Keeps rendered mutants in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub sources: Vec<String>,
}

impl MutantSink for MemorySink {
    fn emit(&mut self, record: &MutantRecord) -> Result<()> {
        debug_assert_eq!(record.sequence_number, self.sources.len());
        self.sources.push(record.rendered_source.clone());
        Ok(())
    }
}
