use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::mutant::MutantRecord;
use crate::error::{MutateError, Result};
use crate::ports::MutantSink;

/// Writes each mutant to `<dir>/<sequence_number>.<extension>`, replacing any
/// existing file of that name.
pub struct FileMutantWriter {
    dir: PathBuf,
    extension: String,
    written: Vec<PathBuf>,
}

impl FileMutantWriter {
    /// Creates `dir` if it does not exist yet.
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            extension: extension.into(),
            written: Vec::new(),
        })
    }

    pub fn path_for(&self, sequence_number: usize) -> PathBuf {
        self.dir
            .join(format!("{}.{}", sequence_number, self.extension))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files written so far, in emission order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl MutantSink for FileMutantWriter {
    fn emit(&mut self, record: &MutantRecord) -> Result<()> {
        let path = self.path_for(record.sequence_number);
        fs::write(&path, &record.rendered_source).map_err(|source| MutateError::Emit {
            index: record.sequence_number,
            source,
        })?;
        debug!(path = %path.display(), "wrote mutant");
        self.written.push(path);
        Ok(())
    }
}
