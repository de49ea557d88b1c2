//! Mutant Orchestrator
//!
//! Repeats placement passes over fresh copies of the subject tree, one per
//! ranked routine per round, and accepts every result that differs from the
//! original and from all earlier mutants. After each round the target depth
//! moves up one layer; when it wraps, the per-pass budget grows and the skip
//! window widens. Both keep growing until they cover every catalog node of
//! every ranked routine. From then on, a run of depth cycles without a new
//! mutant ends the search with `ExhaustedSearchSpace`.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::domain::ast::SyntaxTree;
use crate::domain::call_profile::{CallProfile, CallProfiler};
use crate::domain::metrics::{self, TreeMetrics};
use crate::domain::mutant::MutantRecord;
use crate::domain::placement::{catalog_node_count, select_and_mutate, PlacementRequest};
use crate::domain::settings::MutationSettings;
use crate::error::{MutateError, Result};
use crate::ports::{MutantSink, SyntaxBackend};

/// Everything a completed run produced.
#[derive(Debug, Clone)]
pub struct MutationRun {
    pub seed: u64,
    pub requested: usize,
    pub metrics: TreeMetrics,
    pub ranking: CallProfile,
    pub mutants: Vec<MutantRecord>,
    /// Whether any pass reproduced an already accepted tree.
    pub duplicates_found: bool,
    pub attempts: usize,
    pub rounds: usize,
}

/// Depth/budget schedule of the escalation loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Escalation {
    pub target_depth: usize,
    pub max_mutations: usize,
    min_depth: usize,
    max_depth: usize,
    initial_max_mutations: usize,
}

impl Escalation {
    pub fn new(settings: &MutationSettings) -> Self {
        Self {
            target_depth: settings.min_depth,
            max_mutations: settings.initial_max_mutations,
            min_depth: settings.min_depth,
            max_depth: settings.max_depth,
            initial_max_mutations: settings.initial_max_mutations,
        }
    }

    /// Number of budget increases so far.
    pub fn level(&self) -> usize {
        self.max_mutations - self.initial_max_mutations
    }

    /// Moves to the next round. Returns `true` when a depth cycle just ended
    /// and the budget grew.
    pub fn advance(&mut self) -> bool {
        if self.target_depth < self.max_depth {
            self.target_depth += 1;
            return false;
        }
        self.target_depth = self.min_depth;
        self.max_mutations += 1;
        true
    }
}

pub struct MutantOrchestrator<'a> {
    backend: &'a dyn SyntaxBackend,
    settings: MutationSettings,
}

impl<'a> MutantOrchestrator<'a> {
    pub fn new(backend: &'a dyn SyntaxBackend, settings: MutationSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { backend, settings })
    }

    /// Whether every catalog node of every ranked routine is within reach
    /// of the current skip window and budget.
    fn covers_every_node(&self, catalog_nodes: &[usize], escalation: &Escalation) -> bool {
        catalog_nodes.iter().enumerate().all(|(rank, &nodes)| {
            self.settings
                .covers(rank, escalation.level(), escalation.max_mutations, nodes)
        })
    }

    /// Produces `num_mutants` distinct mutants of `tree`, handing each to
    /// `sink` as soon as it is accepted. `tree` itself is never modified.
    pub fn run(
        &self,
        tree: &SyntaxTree,
        num_mutants: usize,
        sink: &mut dyn MutantSink,
    ) -> Result<MutationRun> {
        let seed = self.settings.seed_for(num_mutants);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let tree_metrics = metrics::measure(tree);
        info!(
            size = tree_metrics.size,
            height = tree_metrics.height,
            "subject program"
        );

        let ranking = CallProfiler::profile(tree);
        let catalog_nodes: Vec<usize> = ranking
            .routines
            .iter()
            .map(|routine| catalog_node_count(tree, &routine.name))
            .collect();
        for (rank, routine) in ranking.routines.iter().enumerate() {
            info!(
                rank,
                routine = %routine.name,
                calls = routine.call_count,
                call_size = routine.representative_call_size,
                catalog_nodes = catalog_nodes[rank],
                "ranked routine"
            );
        }

        let mut accepted: Vec<MutantRecord> = Vec::with_capacity(num_mutants);
        let mut duplicates_found = false;
        let mut attempts = 0;
        let mut rounds = 0;

        if num_mutants > 0 && ranking.is_empty() {
            warn!("no locally defined routine is ever called; nothing to mutate");
            return Err(MutateError::ExhaustedSearchSpace {
                requested: num_mutants,
                emitted: 0,
            });
        }

        let mut escalation = Escalation::new(&self.settings);
        let mut saturated = self.covers_every_node(&catalog_nodes, &escalation);
        let mut accepted_at_cycle_start = 0;
        let mut stale_cycles = 0;
        while accepted.len() < num_mutants {
            rounds += 1;
            for (rank, routine) in ranking.routines.iter().enumerate() {
                if accepted.len() == num_mutants {
                    break;
                }
                let request = PlacementRequest {
                    routine_name: &routine.name,
                    dont_mutate_until: self.settings.skip_bound(rank, escalation.level()),
                    max_mutations: escalation.max_mutations,
                    target_depth: escalation.target_depth,
                };
                let (candidate, outcome) = select_and_mutate(tree.clone(), &request, &mut rng);
                attempts += 1;

                if candidate == *tree {
                    debug!(routine = %routine.name, ?request, "no eligible node");
                    continue;
                }
                if accepted.iter().any(|mutant| mutant.same_tree(&candidate)) {
                    debug!(routine = %routine.name, ?request, "duplicate mutant discarded");
                    duplicates_found = true;
                    continue;
                }

                let rendered_source = self.backend.unparse(&candidate);
                let record = MutantRecord {
                    sequence_number: accepted.len(),
                    tree: candidate,
                    rendered_source,
                    routine: routine.name.clone(),
                    target_depth: escalation.target_depth,
                    max_mutations: escalation.max_mutations,
                    mutations: outcome.mutations,
                };
                sink.emit(&record)?;
                info!(
                    index = record.sequence_number,
                    routine = %record.routine,
                    depth = record.target_depth,
                    edits = record.mutations.len(),
                    "accepted mutant"
                );
                accepted.push(record);
            }

            if accepted.len() == num_mutants {
                break;
            }
            if !escalation.advance() {
                continue;
            }

            if saturated && accepted.len() == accepted_at_cycle_start {
                stale_cycles += 1;
                if stale_cycles >= self.settings.stale_cycle_limit {
                    warn!(
                        emitted = accepted.len(),
                        requested = num_mutants,
                        stale_cycles,
                        "no new mutants with every node in reach"
                    );
                    return Err(MutateError::ExhaustedSearchSpace {
                        requested: num_mutants,
                        emitted: accepted.len(),
                    });
                }
            } else {
                stale_cycles = 0;
            }
            accepted_at_cycle_start = accepted.len();
            saturated = self.covers_every_node(&catalog_nodes, &escalation);
            debug!(
                max_mutations = escalation.max_mutations,
                level = escalation.level(),
                saturated,
                "next depth cycle"
            );
        }

        info!(duplicates_found, attempts, rounds, "mutation run complete");
        Ok(MutationRun {
            seed,
            requested: num_mutants,
            metrics: tree_metrics,
            ranking,
            mutants: accepted,
            duplicates_found,
            attempts,
            rounds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{MemorySink, SynBackend};

    #[test]
    fn test_escalation_cycles_depth_then_grows_budget() {
        let settings = MutationSettings::default().with_depth_range(1, 3);
        let mut escalation = Escalation::new(&settings);
        let mut seen = vec![(escalation.target_depth, escalation.max_mutations)];
        let mut cycle_ends = Vec::new();
        for _ in 0..5 {
            cycle_ends.push(escalation.advance());
            seen.push((escalation.target_depth, escalation.max_mutations));
        }
        assert_eq!(seen, vec![(1, 2), (2, 2), (3, 2), (1, 3), (2, 3), (3, 3)]);
        assert_eq!(cycle_ends, vec![false, false, true, false, false]);
    }

    #[test]
    fn test_coverage_grows_with_escalation() {
        let backend = SynBackend;
        let orchestrator = MutantOrchestrator::new(&backend, MutationSettings::default()).unwrap();
        let mut escalation = Escalation::new(&MutationSettings::default());
        // Rank 0 with 12 nodes needs window 3 * 4 and budget 12: level 10.
        let catalog_nodes = [12];
        let mut level_reached = None;
        for level in 0..20 {
            if orchestrator.covers_every_node(&catalog_nodes, &escalation) {
                level_reached = Some(level);
                break;
            }
            while !escalation.advance() {}
        }
        assert_eq!(level_reached, Some(10));
    }

    #[test]
    fn test_escalation_level_tracks_budget_bumps() {
        let settings = MutationSettings::default().with_depth_range(0, 0);
        let mut escalation = Escalation::new(&settings);
        assert_eq!(escalation.level(), 0);
        escalation.advance();
        assert_eq!(escalation.level(), 1);
        assert_eq!(escalation.max_mutations, 3);
    }

    #[test]
    fn test_zero_mutants_is_a_no_op() {
        let backend = SynBackend;
        let tree = backend_tree(&backend, "fn f() -> bool { true } fn main() { f(); }");
        let orchestrator = MutantOrchestrator::new(&backend, MutationSettings::default()).unwrap();
        let mut sink = MemorySink::default();
        let run = orchestrator.run(&tree, 0, &mut sink).unwrap();
        assert!(run.mutants.is_empty());
        assert!(sink.sources.is_empty());
    }

    #[test]
    fn test_nothing_called_is_exhausted_immediately() {
        let backend = SynBackend;
        let tree = backend_tree(&backend, "fn main() { let x = true; }");
        let orchestrator = MutantOrchestrator::new(&backend, MutationSettings::default()).unwrap();
        let mut sink = MemorySink::default();
        let err = orchestrator.run(&tree, 1, &mut sink).unwrap_err();
        assert!(matches!(
            err,
            MutateError::ExhaustedSearchSpace { requested: 1, emitted: 0 }
        ));
    }

    #[test]
    fn test_routine_without_catalog_nodes_exhausts() {
        let backend = SynBackend;
        let tree = backend_tree(&backend, "fn noop() {} fn main() { noop(); }");
        let orchestrator = MutantOrchestrator::new(&backend, MutationSettings::default()).unwrap();
        let mut sink = MemorySink::default();
        let err = orchestrator.run(&tree, 2, &mut sink).unwrap_err();
        assert!(matches!(
            err,
            MutateError::ExhaustedSearchSpace { requested: 2, emitted: 0 }
        ));
    }

    #[test]
    fn test_invalid_settings_rejected_up_front() {
        let backend = SynBackend;
        let settings = MutationSettings::default().with_depth_range(2, 1);
        assert!(MutantOrchestrator::new(&backend, settings).is_err());
    }

    fn backend_tree(backend: &SynBackend, src: &str) -> SyntaxTree {
        backend.parse(src).unwrap()
    }
}
