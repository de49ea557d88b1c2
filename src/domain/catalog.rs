//! Operator Catalog
//!
//! Mutation rules keyed by node kind. Each rule is a single-point edit:
//! relational and arithmetic operators swap within fixed pairs, boolean
//! operators and literals flip, and assignment or call statements are
//! replaced by the no-op statement `();`.
//!
//! Rules do not decide *whether* a node is mutated; the placement selector
//! does. Expression rules report whether they changed anything so callers can
//! tell an effective edit from an identity application.

use serde::{Deserialize, Serialize};
use syn::punctuated::Punctuated;
use syn::{BinOp, Expr, ExprLit, ExprTuple, Lit, LitBool, Stmt};

use crate::domain::ast::NodeKind;

/// The rule that produced an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationOperator {
    RelationalInversion,
    ConditionInversion,
    ArithmeticSwap,
    BooleanSwap,
    LiteralNegation,
    StatementElision,
}

/// Before/after payload of one in-place edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub operator: MutationOperator,
    pub before: String,
    pub after: String,
}

/// `>=`↔`<`, `>`↔`<=`, `==`↔`!=`.
pub fn invert_relational(op: &BinOp) -> Option<BinOp> {
    let inverted = match op {
        BinOp::Ge(_) => BinOp::Lt(Default::default()),
        BinOp::Lt(_) => BinOp::Ge(Default::default()),
        BinOp::Gt(_) => BinOp::Le(Default::default()),
        BinOp::Le(_) => BinOp::Gt(Default::default()),
        BinOp::Eq(_) => BinOp::Ne(Default::default()),
        BinOp::Ne(_) => BinOp::Eq(Default::default()),
        _ => return None,
    };
    Some(inverted)
}

/// `+`↔`-` and `*`↔`/`, plus their compound-assignment forms.
pub fn swap_arithmetic(op: &BinOp) -> Option<BinOp> {
    let swapped = match op {
        BinOp::Add(_) => BinOp::Sub(Default::default()),
        BinOp::Sub(_) => BinOp::Add(Default::default()),
        BinOp::Mul(_) => BinOp::Div(Default::default()),
        BinOp::Div(_) => BinOp::Mul(Default::default()),
        BinOp::AddAssign(_) => BinOp::SubAssign(Default::default()),
        BinOp::SubAssign(_) => BinOp::AddAssign(Default::default()),
        BinOp::MulAssign(_) => BinOp::DivAssign(Default::default()),
        BinOp::DivAssign(_) => BinOp::MulAssign(Default::default()),
        _ => return None,
    };
    Some(swapped)
}

/// `&&`↔`||`.
pub fn swap_boolean(op: &BinOp) -> Option<BinOp> {
    match op {
        BinOp::And(_) => Some(BinOp::Or(Default::default())),
        BinOp::Or(_) => Some(BinOp::And(Default::default())),
        _ => None,
    }
}

/// `true`↔`false`; any other literal is left alone.
pub fn negate_literal(lit: &Lit) -> Option<Lit> {
    match lit {
        Lit::Bool(value) => Some(Lit::Bool(LitBool::new(!value.value, value.span))),
        _ => None,
    }
}

/// Applies the rule for `kind` to `expr` in place.
///
/// Returns the edit when the node changed, `None` when the rule is the
/// identity for this node (a `%` operator, a string literal, an `if` whose
/// condition is not a comparison).
pub fn mutate_expr(kind: NodeKind, expr: &mut Expr) -> Option<Edit> {
    match (kind, expr) {
        (NodeKind::Compare, Expr::Binary(binary)) => {
            replace_op(&mut binary.op, MutationOperator::RelationalInversion, invert_relational)
        }
        (NodeKind::BinOp, Expr::Binary(binary)) => {
            replace_op(&mut binary.op, MutationOperator::ArithmeticSwap, swap_arithmetic)
        }
        (NodeKind::BoolOp, Expr::Binary(binary)) => {
            replace_op(&mut binary.op, MutationOperator::BooleanSwap, swap_boolean)
        }
        (NodeKind::If, Expr::If(conditional)) => match strip_parens_mut(&mut conditional.cond) {
            Expr::Binary(binary) => {
                replace_op(&mut binary.op, MutationOperator::ConditionInversion, invert_relational)
            }
            _ => None,
        },
        (NodeKind::Constant, Expr::Lit(ExprLit { lit, .. })) => {
            let negated = negate_literal(lit)?;
            let edit = Edit {
                operator: MutationOperator::LiteralNegation,
                before: literal_text(lit),
                after: literal_text(&negated),
            };
            *lit = negated;
            Some(edit)
        }
        _ => None,
    }
}

/// Replacement for an assignment or call statement.
pub fn elide_statement(kind: NodeKind, stmt: &Stmt) -> Option<Stmt> {
    if kind.is_statement() && NodeKind::of_stmt(stmt) == kind {
        Some(noop_statement())
    } else {
        None
    }
}

/// `();`: a statement with no effect and no children.
pub fn noop_statement() -> Stmt {
    let unit = Expr::Tuple(ExprTuple {
        attrs: Vec::new(),
        paren_token: Default::default(),
        elems: Punctuated::new(),
    });
    Stmt::Expr(unit, Some(Default::default()))
}

fn replace_op(
    op: &mut BinOp,
    operator: MutationOperator,
    rule: fn(&BinOp) -> Option<BinOp>,
) -> Option<Edit> {
    let replacement = rule(op)?;
    let edit = Edit {
        operator,
        before: binop_symbol(op).to_string(),
        after: binop_symbol(&replacement).to_string(),
    };
    *op = replacement;
    Some(edit)
}

fn strip_parens_mut(expr: &mut Expr) -> &mut Expr {
    match expr {
        Expr::Paren(paren) => strip_parens_mut(&mut paren.expr),
        other => other,
    }
}

fn literal_text(lit: &Lit) -> String {
    match lit {
        Lit::Bool(value) => value.value.to_string(),
        _ => "<literal>".to_string(),
    }
}

pub fn binop_symbol(op: &BinOp) -> &'static str {
    match op {
        BinOp::Add(_) => "+",
        BinOp::Sub(_) => "-",
        BinOp::Mul(_) => "*",
        BinOp::Div(_) => "/",
        BinOp::Rem(_) => "%",
        BinOp::And(_) => "&&",
        BinOp::Or(_) => "||",
        BinOp::BitXor(_) => "^",
        BinOp::BitAnd(_) => "&",
        BinOp::BitOr(_) => "|",
        BinOp::Shl(_) => "<<",
        BinOp::Shr(_) => ">>",
        BinOp::Eq(_) => "==",
        BinOp::Lt(_) => "<",
        BinOp::Le(_) => "<=",
        BinOp::Ne(_) => "!=",
        BinOp::Ge(_) => ">=",
        BinOp::Gt(_) => ">",
        BinOp::AddAssign(_) => "+=",
        BinOp::SubAssign(_) => "-=",
        BinOp::MulAssign(_) => "*=",
        BinOp::DivAssign(_) => "/=",
        BinOp::RemAssign(_) => "%=",
        BinOp::BitXorAssign(_) => "^=",
        BinOp::BitAndAssign(_) => "&=",
        BinOp::BitOrAssign(_) => "|=",
        BinOp::ShlAssign(_) => "<<=",
        BinOp::ShrAssign(_) => ">>=",
        _ => "?",
    }
}
