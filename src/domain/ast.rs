// AST data structures for Mutant Forge.
// The subject program is held as a `syn::File`; `NodeKind` classifies its
// nodes for the profiler, the placement selector and the operator catalog.

use syn::{BinOp, Expr, Item, Stmt};

/// A parsed subject program.
pub type SyntaxTree = syn::File;

/// Node kinds the engine distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Relational binary expression (`<`, `<=`, `>`, `>=`, `==`, `!=`).
    Compare,
    /// `if` expression.
    If,
    /// Arithmetic, bitwise or compound-assignment binary expression.
    BinOp,
    /// `&&` / `||`.
    BoolOp,
    /// Literal.
    Constant,
    /// Assignment statement: `x = e;`, `x += e;` or `let p = e;`.
    Assign,
    /// Function, method or macro call used as a statement.
    Call,
    /// Routine definition with a body.
    FunctionDef,
    Other,
}

impl NodeKind {
    pub fn of_expr(expr: &Expr) -> NodeKind {
        match expr {
            Expr::Binary(binary) => Self::of_binop(&binary.op),
            Expr::If(_) => NodeKind::If,
            Expr::Lit(_) => NodeKind::Constant,
            _ => NodeKind::Other,
        }
    }

    pub fn of_binop(op: &BinOp) -> NodeKind {
        match op {
            BinOp::Lt(_)
            | BinOp::Le(_)
            | BinOp::Gt(_)
            | BinOp::Ge(_)
            | BinOp::Eq(_)
            | BinOp::Ne(_) => NodeKind::Compare,
            BinOp::And(_) | BinOp::Or(_) => NodeKind::BoolOp,
            _ => NodeKind::BinOp,
        }
    }

    /// Statement-level classification. Only statements terminated by `;` are
    /// assignment or call statements; a trailing expression is a value.
    pub fn of_stmt(stmt: &Stmt) -> NodeKind {
        match stmt {
            Stmt::Local(local) if local.init.is_some() => NodeKind::Assign,
            Stmt::Expr(expr, Some(_)) => match expr {
                Expr::Assign(_) => NodeKind::Assign,
                Expr::Binary(binary) if is_compound_assign(&binary.op) => NodeKind::Assign,
                Expr::Call(_) | Expr::MethodCall(_) | Expr::Macro(_) => NodeKind::Call,
                _ => NodeKind::Other,
            },
            Stmt::Macro(mac) if mac.semi_token.is_some() => NodeKind::Call,
            Stmt::Item(Item::Fn(_)) => NodeKind::FunctionDef,
            _ => NodeKind::Other,
        }
    }

    /// Whether the operator catalog has a rule for this kind.
    pub fn is_mutable(self) -> bool {
        !matches!(self, NodeKind::FunctionDef | NodeKind::Other)
    }

    /// Statement kinds are replaced wholesale instead of edited in place.
    pub fn is_statement(self) -> bool {
        matches!(self, NodeKind::Assign | NodeKind::Call)
    }
}

pub fn is_compound_assign(op: &BinOp) -> bool {
    matches!(
        op,
        BinOp::AddAssign(_)
            | BinOp::SubAssign(_)
            | BinOp::MulAssign(_)
            | BinOp::DivAssign(_)
            | BinOp::RemAssign(_)
            | BinOp::BitXorAssign(_)
            | BinOp::BitAndAssign(_)
            | BinOp::BitOrAssign(_)
            | BinOp::ShlAssign(_)
            | BinOp::ShrAssign(_)
    )
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NodeKind::Compare => "Compare",
            NodeKind::If => "If",
            NodeKind::BinOp => "BinOp",
            NodeKind::BoolOp => "BoolOp",
            NodeKind::Constant => "Constant",
            NodeKind::Assign => "Assign",
            NodeKind::Call => "Call",
            NodeKind::FunctionDef => "FunctionDef",
            NodeKind::Other => "Other",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expr(src: &str) -> Expr {
        syn::parse_str(src).unwrap()
    }

    fn stmt(src: &str) -> Stmt {
        syn::parse_str(src).unwrap()
    }

    #[test]
    fn test_expression_kinds() {
        assert_eq!(NodeKind::of_expr(&expr("a >= b")), NodeKind::Compare);
        assert_eq!(NodeKind::of_expr(&expr("a != b")), NodeKind::Compare);
        assert_eq!(NodeKind::of_expr(&expr("a + b")), NodeKind::BinOp);
        assert_eq!(NodeKind::of_expr(&expr("a % b")), NodeKind::BinOp);
        assert_eq!(NodeKind::of_expr(&expr("a && b")), NodeKind::BoolOp);
        assert_eq!(NodeKind::of_expr(&expr("true")), NodeKind::Constant);
        assert_eq!(NodeKind::of_expr(&expr("if a { b } else { c }")), NodeKind::If);
        assert_eq!(NodeKind::of_expr(&expr("f(a)")), NodeKind::Other);
    }

    #[test]
    fn test_statement_kinds() {
        assert_eq!(NodeKind::of_stmt(&stmt("x = 1;")), NodeKind::Assign);
        assert_eq!(NodeKind::of_stmt(&stmt("x += 1;")), NodeKind::Assign);
        assert_eq!(NodeKind::of_stmt(&stmt("let x = 1;")), NodeKind::Assign);
        assert_eq!(NodeKind::of_stmt(&stmt("let x;")), NodeKind::Other);
        assert_eq!(NodeKind::of_stmt(&stmt("log(x);")), NodeKind::Call);
        assert_eq!(NodeKind::of_stmt(&stmt("v.push(x);")), NodeKind::Call);
        assert_eq!(NodeKind::of_stmt(&stmt("println!(\"{}\", x);")), NodeKind::Call);
        assert_eq!(NodeKind::of_stmt(&stmt("assert!(x > 0);")), NodeKind::Call);
        assert_eq!(NodeKind::of_stmt(&stmt("fn inner() {}")), NodeKind::FunctionDef);
    }

    #[test]
    fn test_mutable_kinds() {
        assert!(NodeKind::Compare.is_mutable());
        assert!(NodeKind::Call.is_mutable());
        assert!(!NodeKind::FunctionDef.is_mutable());
        assert!(!NodeKind::Other.is_mutable());
        assert!(NodeKind::Assign.is_statement());
        assert!(!NodeKind::Constant.is_statement());
    }
}
