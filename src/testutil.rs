//! Tree-building helpers shared by rule and engine tests.

use crate::diagnostic::Diagnostic;
use crate::rule::walker::{CancelToken, RuleWalker};
use crate::rule::{Rule, RuleConfig};
use crate::tree::document::SourceTree;
use crate::tree::{Node, NodeKind, Span};

pub fn ident(name: &str) -> Node {
    Node::new(NodeKind::Identifier, Some(name.to_string()), vec![])
}

pub fn lit(text: &str) -> Node {
    Node::new(NodeKind::Literal, Some(text.to_string()), vec![])
}

pub fn binary(op: &str, lhs: Node, rhs: Node) -> Node {
    Node::new(NodeKind::Binary, Some(op.to_string()), vec![lhs, rhs])
}

pub fn block(statements: Vec<Node>) -> Node {
    Node::new(NodeKind::Block, None, statements)
}

pub fn member(receiver: Node, name: &str) -> Node {
    Node::new(NodeKind::MemberAccess, Some(name.to_string()), vec![receiver])
}

pub fn invoke(callee: Node, args: Vec<Node>) -> Node {
    let mut children = vec![callee];
    children.extend(args);
    Node::new(NodeKind::Invocation, None, children)
}

pub fn lambda(param: &str, body: Node) -> Node {
    Node::new(NodeKind::Lambda, Some(param.to_string()), vec![body])
}

pub fn conditional(condition: Node, when_true: Node, when_false: Node) -> Node {
    Node::new(
        NodeKind::Conditional,
        None,
        vec![condition, when_true, when_false],
    )
}

/// `target = value;` as an expression statement.
pub fn assign_stmt(target: Node, value: Node) -> Node {
    Node::new(
        NodeKind::ExpressionStatement,
        None,
        vec![Node::new(
            NodeKind::Assignment,
            Some("=".to_string()),
            vec![target, value],
        )],
    )
}

pub fn if_else(condition: Node, then_branch: Node, else_branch: Node) -> Node {
    Node::new(NodeKind::If, None, vec![condition, then_branch, else_branch])
}

/// Return `node` with its span replaced.
pub fn spanned(mut node: Node, span: Span) -> Node {
    node.span = span;
    node
}

/// Give every node in the tree a distinct single-line span, so tests can
/// address nodes by span without writing positions out by hand.
pub fn stamp_lines(mut root: Node) -> Node {
    fn stamp(node: &mut Node, next: &mut usize) {
        node.span = Span::new(*next, 0, *next, 40);
        *next += 1;
        for child in &mut node.children {
            stamp(child, next);
        }
    }
    let mut next = 1;
    stamp(&mut root, &mut next);
    root
}

/// Run a single rule over a tree and return its diagnostics.
pub fn run_rule(rule: &dyn Rule, root: Node) -> Vec<Diagnostic> {
    run_rule_with_config(rule, root, RuleConfig::default())
}

/// Run a single rule over a tree with a specific config.
pub fn run_rule_with_config(rule: &dyn Rule, root: Node, config: RuleConfig) -> Vec<Diagnostic> {
    let tree = SourceTree::from_root("test.ast.json", root);
    let mut walker = RuleWalker::new(&tree, vec![(0, rule, config)], false);
    walker.walk(&CancelToken::new());
    walker.diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_stmt_shape() {
        let stmt = assign_stmt(ident("y"), lit("1"));
        assert_eq!(stmt.kind, NodeKind::ExpressionStatement);
        let assignment = &stmt.children[0];
        assert_eq!(assignment.kind, NodeKind::Assignment);
        assert_eq!(assignment.value.as_deref(), Some("="));
        assert_eq!(assignment.children.len(), 2);
    }

    #[test]
    fn stamp_lines_gives_unique_spans() {
        let root = stamp_lines(block(vec![ident("a"), ident("b")]));
        let spans = [
            root.span,
            root.children[0].span,
            root.children[1].span,
        ];
        assert!(spans.iter().all(|s| !s.is_synthesized()));
        assert_ne!(spans[0], spans[1]);
        assert_ne!(spans[1], spans[2]);
    }

    #[test]
    fn builders_produce_synthesized_spans() {
        assert!(ident("x").span.is_synthesized());
        assert!(invoke(member(ident("xs"), "Any"), vec![]).span.is_synthesized());
    }
}
