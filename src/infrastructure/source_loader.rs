use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Extension used for mutants of a subject without one.
pub const DEFAULT_EXTENSION: &str = "rs";

/// A subject program read from disk.
#[derive(Debug, Clone)]
pub struct SubjectSource {
    pub path: PathBuf,
    pub extension: String,
    pub text: String,
}

pub struct SourceLoader;

impl SourceLoader {
    /// Reads the subject program at `path`.
    pub fn load(path: &Path) -> Result<SubjectSource> {
        if path.is_dir() {
            anyhow::bail!("{} is a directory, expected a source file", path.display());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read subject program {}", path.display()))?;
        Ok(SubjectSource {
            path: path.to_path_buf(),
            extension: Self::extension_of(path),
            text,
        })
    }

    pub fn extension_of(path: &Path) -> String {
        path.extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
            .unwrap_or(DEFAULT_EXTENSION)
            .to_string()
    }
}
