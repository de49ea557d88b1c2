// Main library entry point for Mutant Forge.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ports;

pub use error::{MutateError, Result};
