//! Placement Selector
//!
//! Walks a whole program, and inside every definition of the requested
//! routine decides node by node whether to hand the node to the operator
//! catalog. The decision is made during traversal from running counters:
//!
//! - `dont_mutate_until`: only the first catalog-kind nodes (in visit order,
//!   up to and including this index) may be mutated.
//! - `max_mutations`: cap on effective edits in one pass.
//! - `target_depth`: only nodes of this height (counted from the leaves) are
//!   considered, so successive passes sweep one structural layer at a time.
//! - a fair coin, drawn from the caller's generator, last and only when the
//!   other terms hold.

use proc_macro2::Span;
use rand::Rng;
use syn::spanned::Spanned;
use syn::visit::{self, Visit};
use syn::visit_mut::{self, VisitMut};
use syn::{Expr, ImplItemFn, ItemFn, Stmt, TraitItemFn};
use tracing::debug;

use crate::domain::ast::{NodeKind, SyntaxTree};
use crate::domain::catalog::{self, MutationOperator};
use crate::domain::metrics::{self, SyntaxNode};
use crate::domain::mutant::AppliedMutation;

/// Parameters of one selector pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementRequest<'a> {
    pub routine_name: &'a str,
    pub dont_mutate_until: usize,
    pub max_mutations: usize,
    pub target_depth: usize,
}

/// Running counters for one scoped traversal of a routine definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementState {
    pub nodes_visited: usize,
    pub mutations_applied: usize,
    pub dont_mutate_until: usize,
    pub max_mutations: usize,
    pub target_depth: usize,
    pub subtree_height: usize,
}

impl PlacementState {
    pub fn new(subtree_height: usize, request: &PlacementRequest<'_>) -> Self {
        Self {
            nodes_visited: 0,
            mutations_applied: 0,
            dont_mutate_until: request.dont_mutate_until,
            max_mutations: request.max_mutations,
            target_depth: request.target_depth,
            subtree_height,
        }
    }

    /// Distance of a node of `height` below the routine root.
    fn layer(&self, height: usize) -> Option<usize> {
        self.subtree_height.checked_sub(height)
    }

    pub fn at_target_layer(&self, node_height: usize) -> bool {
        match self.layer(self.target_depth) {
            Some(target) => self.layer(node_height) == Some(target),
            None => false,
        }
    }

    pub fn is_eligible<R: Rng + ?Sized>(&self, node_height: usize, rng: &mut R) -> bool {
        self.nodes_visited <= self.dont_mutate_until
            && self.mutations_applied < self.max_mutations
            && self.at_target_layer(node_height)
            && rng.gen_bool(0.5)
    }
}

/// Result of one selector pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlacementOutcome {
    pub mutations: Vec<AppliedMutation>,
    /// Definitions of the routine that were entered.
    pub scopes: usize,
}

impl PlacementOutcome {
    pub fn count(&self) -> usize {
        self.mutations.len()
    }
}

/// Runs one placement pass over `tree` and returns it with the edits made.
///
/// A routine name that matches no definition is not an error; the tree comes
/// back unchanged with a count of zero.
pub fn select_and_mutate<R: Rng + ?Sized>(
    mut tree: SyntaxTree,
    request: &PlacementRequest<'_>,
    rng: &mut R,
) -> (SyntaxTree, PlacementOutcome) {
    let mut locator = RoutineLocator {
        request: *request,
        rng,
        outcome: PlacementOutcome::default(),
    };
    locator.visit_file_mut(&mut tree);
    (tree, locator.outcome)
}

/// Largest number of catalog-kind nodes in any one definition of
/// `routine_name`, counted the way a placement pass counts `nodes_visited`.
/// A pass whose skip bound and budget both reach this number can touch every
/// node of the routine.
pub fn catalog_node_count(tree: &SyntaxTree, routine_name: &str) -> usize {
    let mut census = RoutineCensus {
        routine_name,
        largest: 0,
    };
    census.visit_file(tree);
    census.largest
}

struct RoutineCensus<'a> {
    routine_name: &'a str,
    largest: usize,
}

impl RoutineCensus<'_> {
    fn count(&mut self, walk: impl FnOnce(&mut CatalogNodeCounter)) {
        let mut counter = CatalogNodeCounter::default();
        walk(&mut counter);
        self.largest = self.largest.max(counter.nodes);
    }
}

impl<'ast> Visit<'ast> for RoutineCensus<'_> {
    fn visit_item_fn(&mut self, func: &'ast ItemFn) {
        if func.sig.ident != self.routine_name {
            return visit::visit_item_fn(self, func);
        }
        self.count(|counter| counter.visit_item_fn(func));
    }

    fn visit_impl_item_fn(&mut self, func: &'ast ImplItemFn) {
        if func.sig.ident != self.routine_name {
            return visit::visit_impl_item_fn(self, func);
        }
        self.count(|counter| counter.visit_impl_item_fn(func));
    }

    fn visit_trait_item_fn(&mut self, func: &'ast TraitItemFn) {
        if func.default.is_none() || func.sig.ident != self.routine_name {
            return visit::visit_trait_item_fn(self, func);
        }
        self.count(|counter| counter.visit_trait_item_fn(func));
    }
}

#[derive(Default)]
struct CatalogNodeCounter {
    nodes: usize,
}

impl<'ast> Visit<'ast> for CatalogNodeCounter {
    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        if NodeKind::of_stmt(stmt).is_statement() {
            self.nodes += 1;
        }
        visit::visit_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        if NodeKind::of_expr(expr).is_mutable() {
            self.nodes += 1;
        }
        visit::visit_expr(self, expr);
    }
}

/// Pass-through traversal that hands matching definitions to a scope.
struct RoutineLocator<'a, 'r, R: ?Sized> {
    request: PlacementRequest<'a>,
    rng: &'r mut R,
    outcome: PlacementOutcome,
}

impl<R: Rng + ?Sized> RoutineLocator<'_, '_, R> {
    fn scope(&mut self, subtree_height: usize) -> ScopedMutator<'_, R> {
        self.outcome.scopes += 1;
        ScopedMutator {
            state: PlacementState::new(subtree_height, &self.request),
            rng: &mut *self.rng,
            mutations: Vec::new(),
        }
    }
}

impl<R: Rng + ?Sized> VisitMut for RoutineLocator<'_, '_, R> {
    fn visit_item_fn_mut(&mut self, func: &mut ItemFn) {
        if func.sig.ident != self.request.routine_name {
            return visit_mut::visit_item_fn_mut(self, func);
        }
        let mut scope = self.scope(metrics::height(&*func));
        scope.visit_item_fn_mut(func);
        let mutations = scope.mutations;
        self.outcome.mutations.extend(mutations);
    }

    fn visit_impl_item_fn_mut(&mut self, func: &mut ImplItemFn) {
        if func.sig.ident != self.request.routine_name {
            return visit_mut::visit_impl_item_fn_mut(self, func);
        }
        let mut scope = self.scope(metrics::height(&*func));
        scope.visit_impl_item_fn_mut(func);
        let mutations = scope.mutations;
        self.outcome.mutations.extend(mutations);
    }

    fn visit_trait_item_fn_mut(&mut self, func: &mut TraitItemFn) {
        if func.default.is_none() || func.sig.ident != self.request.routine_name {
            return visit_mut::visit_trait_item_fn_mut(self, func);
        }
        let mut scope = self.scope(metrics::height(&*func));
        scope.visit_trait_item_fn_mut(func);
        let mutations = scope.mutations;
        self.outcome.mutations.extend(mutations);
    }
}

/// Traversal of one routine definition with its own counters.
struct ScopedMutator<'r, R: ?Sized> {
    state: PlacementState,
    rng: &'r mut R,
    mutations: Vec<AppliedMutation>,
}

impl<R: Rng + ?Sized> ScopedMutator<'_, R> {
    fn consider<N: SyntaxNode + Spanned>(&mut self, kind: NodeKind, node: &N) -> Option<usize> {
        let node_height = metrics::height(node);
        let eligible = self.state.is_eligible(node_height, self.rng);
        self.state.nodes_visited += 1;
        if !eligible {
            return None;
        }
        debug!(
            node = %kind,
            node_height,
            subtree_height = self.state.subtree_height,
            visit_index = self.state.nodes_visited - 1,
            mutations_applied = self.state.mutations_applied,
            "mutating node"
        );
        Some(line_of(node.span()))
    }

    fn record(&mut self, mutation: AppliedMutation) {
        self.state.mutations_applied += 1;
        self.mutations.push(mutation);
    }
}

fn line_of(span: Span) -> usize {
    span.start().line
}

impl<R: Rng + ?Sized> VisitMut for ScopedMutator<'_, R> {
    fn visit_stmt_mut(&mut self, stmt: &mut Stmt) {
        let kind = NodeKind::of_stmt(stmt);
        if kind.is_statement() {
            if let Some(line) = self.consider(kind, &*stmt) {
                if let Some(replacement) = catalog::elide_statement(kind, stmt) {
                    *stmt = replacement;
                    self.record(AppliedMutation::new(
                        MutationOperator::StatementElision,
                        kind,
                        line,
                        kind.to_string(),
                        "();",
                    ));
                }
            }
        }
        // A replaced statement has no children left to visit.
        visit_mut::visit_stmt_mut(self, stmt);
    }

    fn visit_expr_mut(&mut self, expr: &mut Expr) {
        let kind = NodeKind::of_expr(expr);
        if kind.is_mutable() {
            if let Some(line) = self.consider(kind, &*expr) {
                if let Some(edit) = catalog::mutate_expr(kind, expr) {
                    self.record(AppliedMutation::new(
                        edit.operator,
                        kind,
                        line,
                        edit.before,
                        edit.after,
                    ));
                }
            }
        }
        visit_mut::visit_expr_mut(self, expr);
    }
}
