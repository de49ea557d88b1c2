// Application layer for Mutant Forge: wires ports to the mutation engine.

pub mod orchestrator;
pub mod report;

use tracing::info;

use crate::domain::settings::MutationSettings;
use crate::error::Result;
use crate::ports::{MutantSink, SyntaxBackend};

pub use orchestrator::{MutantOrchestrator, MutationRun};
pub use report::RunReport;

pub struct MutateUsecase<'a> {
    pub backend: &'a dyn SyntaxBackend,
    pub sink: &'a mut dyn MutantSink,
    pub settings: MutationSettings,
}

impl<'a> MutateUsecase<'a> {
    /// Parses `source` and writes `num_mutants` distinct mutants to the sink.
    pub fn run(&mut self, source: &str, num_mutants: usize) -> Result<MutationRun> {
        let tree = self.backend.parse(source)?;
        info!(items = tree.items.len(), num_mutants, "parsed subject program");
        let orchestrator = MutantOrchestrator::new(self.backend, self.settings.clone())?;
        orchestrator.run(&tree, num_mutants, &mut *self.sink)
    }
}
