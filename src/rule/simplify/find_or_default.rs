use crate::diagnostic::Diagnostic;
use crate::pattern::{Pattern, match_pattern};
use crate::rule::{Rule, RuleConfig};
use crate::tree::document::SourceTree;
use crate::tree::{Node, NodeKind};

/// Flags `xs.Any(p) ? xs.First(p) : null` (or `: default`) and rewrites it
/// to `xs.FirstOrDefault(p)`. The backreferences enforce that both calls
/// share the same receiver and the same predicate, present or absent.
pub struct FindOrDefault {
    pattern: Pattern,
}

impl FindOrDefault {
    pub fn new() -> Self {
        let any_call = Pattern::node(
            NodeKind::Invocation,
            vec![
                Pattern::node_with_value(NodeKind::MemberAccess, "Any", vec![Pattern::any("recv")]),
                Pattern::any_or_absent("pred"),
            ],
        );
        let first_call = Pattern::node(
            NodeKind::Invocation,
            vec![
                Pattern::node_with_value(
                    NodeKind::MemberAccess,
                    "First",
                    vec![Pattern::backref("recv")],
                ),
                Pattern::backref("pred"),
            ],
        );
        let fallback = Pattern::choice(vec![
            Pattern::node(NodeKind::NullLiteral, vec![]),
            Pattern::node(NodeKind::DefaultExpr, vec![Pattern::any_or_absent("default_type")]),
        ]);
        Self {
            pattern: Pattern::node(NodeKind::Conditional, vec![any_call, first_call, fallback]),
        }
    }
}

impl Default for FindOrDefault {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for FindOrDefault {
    fn name(&self) -> &'static str {
        "Simplify/FindOrDefault"
    }

    fn description(&self) -> &'static str {
        "Replace Any/First conditional with FirstOrDefault"
    }

    fn check_node(
        &self,
        tree: &SourceTree,
        node: &Node,
        config: &RuleConfig,
    ) -> Option<Diagnostic> {
        if node.kind != NodeKind::Conditional {
            return None;
        }
        match_pattern(&self.pattern, node)?;
        Some(self.diagnostic(
            tree,
            &node.span,
            config,
            "Use `FirstOrDefault` instead of `Any` followed by `First`.".to_string(),
        ))
    }

    fn fix(&self, node: &Node) -> Option<Node> {
        let captures = match_pattern(&self.pattern, node)?;
        let receiver = captures.node("recv")?;
        let member = Node::new(
            NodeKind::MemberAccess,
            Some("FirstOrDefault".to_string()),
            vec![receiver.clone()],
        );
        let mut children = vec![member];
        if let Some(predicate) = captures.node("pred") {
            children.push(predicate.clone());
        }
        Some(Node::new(NodeKind::Invocation, None, children))
    }
}
