// Call profile structures for Mutant Forge.
// Counts how often each locally defined routine is called by simple name.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use syn::visit::{self, Visit};
use syn::{Expr, ExprCall, ImplItemFn, ItemFn, TraitItemFn};

use crate::domain::ast::SyntaxTree;
use crate::domain::metrics;

/// Call statistics for one routine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineProfile {
    pub name: String,
    pub call_count: usize,
    /// Size of the first call expression seen for this name.
    pub representative_call_size: usize,
}

/// Routines ranked by descending call count.
#[derive(Debug, Clone, Default)]
pub struct CallProfile {
    pub routines: Vec<RoutineProfile>,
}

impl CallProfile {
    pub fn get(&self, name: &str) -> Option<&RoutineProfile> {
        self.routines.iter().find(|r| r.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.routines.iter().map(|r| r.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.routines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routines.is_empty()
    }
}

/// Single-pass collector of call sites and routine definitions.
#[derive(Debug, Default)]
pub struct CallProfiler {
    /// Call targets in order of first sighting.
    calls: Vec<RoutineProfile>,
    index: HashMap<String, usize>,
    definitions: HashSet<String>,
}

impl CallProfiler {
    pub fn profile(tree: &SyntaxTree) -> CallProfile {
        let mut profiler = CallProfiler::default();
        profiler.visit_file(tree);
        profiler.finish()
    }

    fn record_call(&mut self, name: String, call: &ExprCall) {
        if let Some(&slot) = self.index.get(&name) {
            self.calls[slot].call_count += 1;
            return;
        }
        let call_size = metrics::size(&Expr::Call(call.clone()));
        self.index.insert(name.clone(), self.calls.len());
        self.calls.push(RoutineProfile {
            name,
            call_count: 1,
            representative_call_size: call_size,
        });
    }

    fn finish(self) -> CallProfile {
        let definitions = self.definitions;
        let mut routines: Vec<RoutineProfile> = self
            .calls
            .into_iter()
            .filter(|r| definitions.contains(&r.name))
            .collect();
        // Stable: ties keep first-call order.
        routines.sort_by(|a, b| b.call_count.cmp(&a.call_count));
        CallProfile { routines }
    }
}

/// Name of a callee written as a bare identifier, e.g. `helper(x)`.
fn simple_callee(func: &Expr) -> Option<String> {
    match func {
        Expr::Path(path) if path.qself.is_none() => {
            path.path.get_ident().map(|ident| ident.to_string())
        }
        Expr::Paren(paren) => simple_callee(&paren.expr),
        _ => None,
    }
}

impl<'ast> Visit<'ast> for CallProfiler {
    fn visit_expr_call(&mut self, call: &'ast ExprCall) {
        if let Some(name) = simple_callee(&call.func) {
            self.record_call(name, call);
        }
        visit::visit_expr_call(self, call);
    }

    fn visit_item_fn(&mut self, func: &'ast ItemFn) {
        self.definitions.insert(func.sig.ident.to_string());
        visit::visit_item_fn(self, func);
    }

    fn visit_impl_item_fn(&mut self, func: &'ast ImplItemFn) {
        self.definitions.insert(func.sig.ident.to_string());
        visit::visit_impl_item_fn(self, func);
    }

    fn visit_trait_item_fn(&mut self, func: &'ast TraitItemFn) {
        if func.default.is_some() {
            self.definitions.insert(func.sig.ident.to_string());
        }
        visit::visit_trait_item_fn(self, func);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(src: &str) -> CallProfile {
        CallProfiler::profile(&syn::parse_file(src).unwrap())
    }

    #[test]
    fn test_counts_local_calls_only() {
        let cp = profile(
            r#"
            fn helper(x: i32) -> i32 { x + 1 }
            fn main() {
                let a = helper(1);
                let b = helper(helper(a));
                drop(b);
                std::mem::drop(a);
            }
            "#,
        );
        assert_eq!(cp.len(), 1);
        let helper = cp.get("helper").unwrap();
        assert_eq!(helper.call_count, 3);
        assert!(cp.get("drop").is_none());
        assert!(cp.get("main").is_none(), "main is defined but never called");
    }

    #[test]
    fn test_representative_size_is_first_call() {
        let cp = profile(
            r#"
            fn f(x: i32) -> i32 { x }
            fn g() { f(1); f(1 + 2 + 3); }
            "#,
        );
        // Call + path + literal.
        assert_eq!(cp.get("f").unwrap().representative_call_size, 3);
    }

    #[test]
    fn test_ranking_descends_with_stable_ties() {
        let cp = profile(
            r#"
            fn a() {}
            fn b() {}
            fn c() {}
            fn run() { b(); a(); c(); c(); a(); b(); c(); }
            "#,
        );
        let names: Vec<&str> = cp.names().collect();
        assert_eq!(names, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_method_calls_are_not_simple_names() {
        let cp = profile(
            r#"
            struct S;
            impl S {
                fn step(&self) {}
                fn helper() {}
                fn run(&self) { self.step(); Self::helper(); }
            }
            fn step() {}
            fn main() { step(); }
            "#,
        );
        assert_eq!(cp.get("step").unwrap().call_count, 1);
        assert!(cp.get("helper").is_none());
    }

    #[test]
    fn test_empty_program() {
        let cp = profile("");
        assert!(cp.is_empty());
    }
}
