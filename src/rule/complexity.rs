//! Complexity predicates deciding when a structurally valid candidate is
//! too complicated to rewrite profitably.

use crate::tree::{Node, NodeKind};

/// True when `expr` should not be placed inside a conditional expression:
/// it spans more than one line, or is itself a conditional, or is a binary
/// expression.
pub fn is_complex_expression(expr: &Node) -> bool {
    expr.span.is_multiline()
        || matches!(expr.kind, NodeKind::Conditional | NodeKind::Binary)
}

/// True when `expr` does not read naturally as a conditional-expression
/// test. Only short relational/equality comparisons, plain values, and
/// calls count as simple; parenthesized and prefix-unary expressions are
/// judged by their operand; everything else is complex.
pub fn is_complex_condition(expr: &Node) -> bool {
    if expr.span.is_multiline() {
        return true;
    }
    match expr.kind {
        NodeKind::Literal
        | NodeKind::NullLiteral
        | NodeKind::Identifier
        | NodeKind::MemberAccess
        | NodeKind::Invocation => false,
        NodeKind::Parenthesized | NodeKind::PrefixUnary => {
            expr.children.first().is_none_or(is_complex_condition)
        }
        NodeKind::Binary => !matches!(
            expr.value.as_deref(),
            Some(">" | ">=" | "==" | "!=" | "<" | "<=")
        ),
        _ => true,
    }
}
