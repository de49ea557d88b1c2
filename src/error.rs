// Error types for Mutant Forge.

use thiserror::Error;

/// Errors raised by the mutation engine and its ports.
#[derive(Debug, Error)]
pub enum MutateError {
    /// The subject program is not valid Rust.
    #[error("failed to parse subject program: {0}")]
    Parse(String),

    /// Every node was in reach and the search stopped producing new mutants
    /// before the requested count was reached.
    #[error("search space exhausted: produced {emitted} of {requested} requested mutants")]
    ExhaustedSearchSpace { requested: usize, emitted: usize },

    /// Mutation settings are inconsistent.
    #[error("invalid mutation settings: {0}")]
    InvalidSettings(String),

    /// A mutant could not be handed to its sink.
    #[error("failed to emit mutant #{index}: {source}")]
    Emit {
        index: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<syn::Error> for MutateError {
    fn from(err: syn::Error) -> Self {
        let start = err.span().start();
        MutateError::Parse(format!("{} (line {}, column {})", err, start.line, start.column))
    }
}

pub type Result<T> = std::result::Result<T, MutateError>;
