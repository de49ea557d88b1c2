use serde::{Deserialize, Serialize};

use crate::application::orchestrator::MutationRun;
use crate::domain::call_profile::RoutineProfile;
use crate::domain::mutant::AppliedMutation;

/// Serializable summary of one mutation run.
#[derive(Debug, Serialize, Deserialize)]
pub struct RunReport {
    pub source: Option<String>,
    pub seed: u64,
    pub requested: usize,
    pub emitted: usize,
    pub tree_size: usize,
    pub tree_height: usize,
    pub ranking: Vec<RoutineProfile>,
    pub attempts: usize,
    pub rounds: usize,
    pub duplicates_found: bool,
    pub mutants: Vec<MutantDto>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MutantDto {
    pub index: usize,
    pub routine: String,
    pub target_depth: usize,
    pub max_mutations: usize,
    pub mutations: Vec<AppliedMutation>,
}

impl RunReport {
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl From<&MutationRun> for RunReport {
    fn from(run: &MutationRun) -> Self {
        let mutants = run
            .mutants
            .iter()
            .map(|m| MutantDto {
                index: m.sequence_number,
                routine: m.routine.clone(),
                target_depth: m.target_depth,
                max_mutations: m.max_mutations,
                mutations: m.mutations.clone(),
            })
            .collect();

        RunReport {
            source: None,
            seed: run.seed,
            requested: run.requested,
            emitted: run.mutants.len(),
            tree_size: run.metrics.size,
            tree_height: run.metrics.height,
            ranking: run.ranking.routines.clone(),
            attempts: run.attempts,
            rounds: run.rounds,
            duplicates_found: run.duplicates_found,
            mutants,
        }
    }
}
