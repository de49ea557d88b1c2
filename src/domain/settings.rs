//! Mutation settings
//!
//! Knobs of the escalation loop. Every field has a default, so a TOML file
//! only needs to name what it changes.

use serde::{Deserialize, Serialize};

use crate::error::{MutateError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MutationSettings {
    /// Per-pass mutation budget of the first escalation round.
    pub initial_max_mutations: usize,
    /// Lowest target depth, counted from the leaves (0 = leaves).
    pub min_depth: usize,
    /// Highest target depth before the cycle wraps and the budget grows.
    pub max_depth: usize,
    /// Period of the per-routine skip offset.
    pub skip_cycle: usize,
    /// Consecutive depth cycles without a new mutant, after every node of
    /// every ranked routine became reachable, before the search is declared
    /// exhausted.
    pub stale_cycle_limit: usize,
    /// Overrides the count-derived seed.
    pub seed: Option<u64>,
}

impl Default for MutationSettings {
    fn default() -> Self {
        Self {
            initial_max_mutations: 2,
            min_depth: 0,
            max_depth: 3,
            skip_cycle: 3,
            stale_cycle_limit: 16,
            seed: None,
        }
    }
}

impl MutationSettings {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_depth_range(mut self, min_depth: usize, max_depth: usize) -> Self {
        self.min_depth = min_depth;
        self.max_depth = max_depth;
        self
    }

    pub fn with_stale_cycle_limit(mut self, stale_cycle_limit: usize) -> Self {
        self.stale_cycle_limit = stale_cycle_limit;
        self
    }

    /// Seed for a run producing `num_mutants` mutants.
    pub fn seed_for(&self, num_mutants: usize) -> u64 {
        self.seed.unwrap_or(num_mutants as u64)
    }

    /// Skip bound for the routine at `rank` after `escalation` budget bumps.
    /// Grows without limit, so every node index is eventually covered.
    pub fn skip_bound(&self, rank: usize, escalation: usize) -> usize {
        rank % self.skip_cycle + escalation * self.skip_cycle
    }

    /// Whether a pass with this skip bound and budget can reach every one of
    /// `catalog_nodes` nodes of a routine.
    pub fn covers(
        &self,
        rank: usize,
        escalation: usize,
        max_mutations: usize,
        catalog_nodes: usize,
    ) -> bool {
        self.skip_bound(rank, escalation) + 1 >= catalog_nodes && max_mutations >= catalog_nodes
    }

    pub fn validate(&self) -> Result<()> {
        if self.initial_max_mutations == 0 {
            return Err(MutateError::InvalidSettings(
                "initial_max_mutations must be at least 1".into(),
            ));
        }
        if self.min_depth > self.max_depth {
            return Err(MutateError::InvalidSettings(format!(
                "min_depth ({}) exceeds max_depth ({})",
                self.min_depth, self.max_depth
            )));
        }
        if self.skip_cycle == 0 {
            return Err(MutateError::InvalidSettings(
                "skip_cycle must be at least 1".into(),
            ));
        }
        if self.stale_cycle_limit == 0 {
            return Err(MutateError::InvalidSettings(
                "stale_cycle_limit must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
