// Domain layer for Mutant Forge: syntax-tree model and the mutation engine.

pub mod ast;
pub mod call_profile;
pub mod catalog;
pub mod metrics;
pub mod mutant;
pub mod placement;
pub mod settings;
