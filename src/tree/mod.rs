//! The tree model consumed by every rule.
//!
//! Trees arrive pre-parsed from the host as `*.ast.json` documents; this
//! module only reads them. Rewrites construct brand-new nodes with
//! synthesized spans and never mutate a loaded tree.

pub mod document;

use serde::{Deserialize, Serialize};

/// Node kinds in the supported expression/statement grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    If,
    Block,
    ExpressionStatement,
    Assignment,
    Conditional,
    Binary,
    PrefixUnary,
    Parenthesized,
    Invocation,
    MemberAccess,
    Lambda,
    Identifier,
    Literal,
    NullLiteral,
    DefaultExpr,
}

impl NodeKind {
    /// Every kind, in declaration order.
    pub const ALL: [NodeKind; 15] = [
        NodeKind::If,
        NodeKind::Block,
        NodeKind::ExpressionStatement,
        NodeKind::Assignment,
        NodeKind::Conditional,
        NodeKind::Binary,
        NodeKind::PrefixUnary,
        NodeKind::Parenthesized,
        NodeKind::Invocation,
        NodeKind::MemberAccess,
        NodeKind::Lambda,
        NodeKind::Identifier,
        NodeKind::Literal,
        NodeKind::NullLiteral,
        NodeKind::DefaultExpr,
    ];
}

/// Source extent of a node. Lines are 1-indexed, columns 0-indexed.
///
/// A default (all-zero) span marks a synthesized node that has no position
/// in any document.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Span {
    #[serde(default)]
    pub start_line: usize,
    #[serde(default)]
    pub start_column: usize,
    #[serde(default)]
    pub end_line: usize,
    #[serde(default)]
    pub end_column: usize,
}

impl Span {
    pub fn new(start_line: usize, start_column: usize, end_line: usize, end_column: usize) -> Self {
        Self {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }

    pub fn is_multiline(&self) -> bool {
        self.end_line > self.start_line
    }

    pub fn is_synthesized(&self) -> bool {
        *self == Span::default()
    }

    pub fn start(&self) -> (usize, usize) {
        (self.start_line, self.start_column)
    }

    pub fn end(&self) -> (usize, usize) {
        (self.end_line, self.end_column)
    }

    /// True when the two spans cover any common position.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start() < other.end() && other.start() < self.end()
    }
}

/// An immutable syntax-tree node.
///
/// `value` carries the token payload where one exists: identifier name,
/// literal text, operator lexeme, or member name on `MemberAccess`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
    #[serde(default)]
    pub span: Span,
}

impl Node {
    /// Construct a synthesized node (default span).
    pub fn new(kind: NodeKind, value: Option<String>, children: Vec<Node>) -> Self {
        Self {
            kind,
            value,
            children,
            span: Span::default(),
        }
    }

    pub fn leaf(kind: NodeKind) -> Self {
        Self::new(kind, None, Vec::new())
    }

    /// Equality by kind, value, and children, ignoring spans.
    pub fn structurally_equal(&self, other: &Node) -> bool {
        self.kind == other.kind
            && self.value == other.value
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(&other.children)
                .all(|(a, b)| a.structurally_equal(b))
    }

    /// Find the first node (depth-first) whose span equals `span`.
    /// Synthesized spans never match.
    pub fn find_by_span(&self, span: &Span) -> Option<&Node> {
        if span.is_synthesized() {
            return None;
        }
        if self.span == *span {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_span(span))
    }

    /// Count of nodes in this subtree, including self.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }
}
