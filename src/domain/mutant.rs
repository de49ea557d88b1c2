// Mutant records for Mutant Forge.

use serde::{Deserialize, Serialize};

use crate::domain::ast::{NodeKind, SyntaxTree};
use crate::domain::catalog::MutationOperator;

/// One effective edit applied by the placement selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedMutation {
    pub operator: MutationOperator,
    /// Kind of the node that was edited or replaced.
    pub node: String,
    /// 1-based source line of the original node.
    pub line: usize,
    pub before: String,
    pub after: String,
}

impl AppliedMutation {
    pub fn new(
        operator: MutationOperator,
        kind: NodeKind,
        line: usize,
        before: impl Into<String>,
        after: impl Into<String>,
    ) -> Self {
        Self {
            operator,
            node: kind.to_string(),
            line,
            before: before.into(),
            after: after.into(),
        }
    }
}

impl std::fmt::Display for AppliedMutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line {}: {} `{}` -> `{}`",
            self.line, self.node, self.before, self.after
        )
    }
}

/// An accepted mutant. Never modified after creation.
#[derive(Debug, Clone)]
pub struct MutantRecord {
    /// Zero-based emission index; also the output file stem.
    pub sequence_number: usize,
    pub tree: SyntaxTree,
    pub rendered_source: String,
    /// Routine the placement pass was scoped to.
    pub routine: String,
    pub target_depth: usize,
    /// Mutation budget in effect when the mutant was generated.
    pub max_mutations: usize,
    pub mutations: Vec<AppliedMutation>,
}

impl MutantRecord {
    /// Structural equality with another tree; spans are ignored.
    pub fn same_tree(&self, tree: &SyntaxTree) -> bool {
        self.tree == *tree
    }
}
