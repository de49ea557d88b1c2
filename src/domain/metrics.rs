//! Tree Metrics
//!
//! Structural size and height of syntax subtrees. A node is any file, item,
//! impl/trait item, statement or expression; blocks, patterns, types and
//! paths are transparent and only connect nodes to their children.

use syn::visit::{self, Visit};
use syn::{Expr, File, ImplItem, ImplItemFn, Item, ItemFn, Stmt, TraitItem, TraitItemFn};

/// Size and height of a subtree, measured in one walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TreeMetrics {
    /// Number of nodes, the root included.
    pub size: usize,
    /// Longest root-to-leaf edge count; 0 for a leaf.
    pub height: usize,
}

/// Anything the metrics walker can be rooted at.
pub trait SyntaxNode {
    fn walk(&self, walker: &mut MetricsWalker);
}

pub fn measure<N: SyntaxNode + ?Sized>(node: &N) -> TreeMetrics {
    let mut walker = MetricsWalker::default();
    node.walk(&mut walker);
    TreeMetrics {
        size: walker.size,
        height: walker.max_depth.saturating_sub(1),
    }
}

pub fn size<N: SyntaxNode + ?Sized>(node: &N) -> usize {
    measure(node).size
}

pub fn height<N: SyntaxNode + ?Sized>(node: &N) -> usize {
    measure(node).height
}

#[derive(Debug, Default)]
pub struct MetricsWalker {
    size: usize,
    depth: usize,
    max_depth: usize,
}

impl MetricsWalker {
    fn enter(&mut self) {
        self.size += 1;
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }
}

impl<'ast> Visit<'ast> for MetricsWalker {
    fn visit_item(&mut self, item: &'ast Item) {
        self.enter();
        visit::visit_item(self, item);
        self.leave();
    }

    fn visit_impl_item(&mut self, item: &'ast ImplItem) {
        self.enter();
        visit::visit_impl_item(self, item);
        self.leave();
    }

    fn visit_trait_item(&mut self, item: &'ast TraitItem) {
        self.enter();
        visit::visit_trait_item(self, item);
        self.leave();
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        self.enter();
        visit::visit_stmt(self, stmt);
        self.leave();
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        self.enter();
        visit::visit_expr(self, expr);
        self.leave();
    }
}

impl SyntaxNode for File {
    fn walk(&self, walker: &mut MetricsWalker) {
        walker.enter();
        visit::visit_file(walker, self);
        walker.leave();
    }
}

impl SyntaxNode for Item {
    fn walk(&self, walker: &mut MetricsWalker) {
        walker.visit_item(self);
    }
}

impl SyntaxNode for ItemFn {
    fn walk(&self, walker: &mut MetricsWalker) {
        walker.enter();
        visit::visit_item_fn(walker, self);
        walker.leave();
    }
}

impl SyntaxNode for ImplItem {
    fn walk(&self, walker: &mut MetricsWalker) {
        walker.visit_impl_item(self);
    }
}

impl SyntaxNode for ImplItemFn {
    fn walk(&self, walker: &mut MetricsWalker) {
        walker.enter();
        visit::visit_impl_item_fn(walker, self);
        walker.leave();
    }
}

impl SyntaxNode for TraitItemFn {
    fn walk(&self, walker: &mut MetricsWalker) {
        walker.enter();
        visit::visit_trait_item_fn(walker, self);
        walker.leave();
    }
}

impl SyntaxNode for Stmt {
    fn walk(&self, walker: &mut MetricsWalker) {
        walker.visit_stmt(self);
    }
}

impl SyntaxNode for Expr {
    fn walk(&self, walker: &mut MetricsWalker) {
        walker.visit_expr(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expr(src: &str) -> Expr {
        syn::parse_str(src).unwrap()
    }

    #[test]
    fn test_leaf_metrics() {
        let leaf = expr("x");
        assert_eq!(measure(&leaf), TreeMetrics { size: 1, height: 0 });
        assert_eq!(height(&expr("42")), 0);
    }

    #[test]
    fn test_nested_expression_metrics() {
        assert_eq!(measure(&expr("a + b")), TreeMetrics { size: 3, height: 1 });
        // a + (b * c)
        assert_eq!(measure(&expr("a + b * c")), TreeMetrics { size: 5, height: 2 });
    }

    #[test]
    fn test_statement_metrics() {
        let stmt: Stmt = syn::parse_str("x = 1;").unwrap();
        assert_eq!(measure(&stmt), TreeMetrics { size: 4, height: 2 });

        let local: Stmt = syn::parse_str("let y = 2;").unwrap();
        assert_eq!(measure(&local), TreeMetrics { size: 2, height: 1 });
    }

    #[test]
    fn test_routine_and_file_metrics() {
        let file = syn::parse_file(
            "fn f(x: i32) -> i32 { if x >= 0 { x } else { -x } }",
        )
        .unwrap();
        assert_eq!(measure(&file), TreeMetrics { size: 13, height: 7 });

        let Item::Fn(func) = &file.items[0] else {
            panic!("expected a function");
        };
        assert_eq!(height(func), 6);
        assert_eq!(size(func), 12);
        assert_eq!(height(&file.items[0]), 6);
    }
}
