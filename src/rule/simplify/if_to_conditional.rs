use crate::diagnostic::Diagnostic;
use crate::rule::complexity::{is_complex_condition, is_complex_expression};
use crate::rule::{Rule, RuleConfig};
use crate::tree::document::SourceTree;
use crate::tree::{Node, NodeKind};

/// Flags `if (c) { x = a; } else { x = b; }` and rewrites it to
/// `x = c ? a : b;`.
pub struct IfToConditional;

/// The pieces of an if/else whose branches each hold one assignment to the
/// same target with the same operator.
pub struct IfAssignment<'a> {
    pub condition: &'a Node,
    pub operator: &'a str,
    pub target: &'a Node,
    pub when_true: &'a Node,
    pub when_false: &'a Node,
}

/// Reduce a branch to its sole statement: the branch itself, or the single
/// statement of a one-statement block.
fn sole_statement(branch: &Node) -> Option<&Node> {
    match branch.kind {
        NodeKind::Block => match branch.children.as_slice() {
            [stmt] => Some(stmt),
            _ => None,
        },
        _ => Some(branch),
    }
}

/// Split an expression statement into its assignment's (operator, target,
/// value) parts.
fn assignment_parts(stmt: &Node) -> Option<(&str, &Node, &Node)> {
    if stmt.kind != NodeKind::ExpressionStatement {
        return None;
    }
    let [assignment] = stmt.children.as_slice() else {
        return None;
    };
    if assignment.kind != NodeKind::Assignment {
        return None;
    }
    let [target, value] = assignment.children.as_slice() else {
        return None;
    };
    let operator = assignment.value.as_deref()?;
    Some((operator, target, value))
}

/// Extract the rewrite tuple from an if-statement. Returns `None` whenever
/// the shape deviates: missing else, more than one statement per branch,
/// non-assignment statements, different targets, or different operators.
pub fn parse_if_assignment(node: &Node) -> Option<IfAssignment<'_>> {
    if node.kind != NodeKind::If {
        return None;
    }
    let [condition, then_branch, else_branch] = node.children.as_slice() else {
        return None;
    };
    let (then_op, then_target, when_true) = assignment_parts(sole_statement(then_branch)?)?;
    let (else_op, else_target, when_false) = assignment_parts(sole_statement(else_branch)?)?;
    if then_op != else_op || !then_target.structurally_equal(else_target) {
        return None;
    }
    Some(IfAssignment {
        condition,
        operator: then_op,
        target: then_target,
        when_true,
        when_false,
    })
}

impl IfToConditional {
    fn candidate<'a>(&self, node: &'a Node) -> Option<IfAssignment<'a>> {
        let parts = parse_if_assignment(node)?;
        if is_complex_condition(parts.condition)
            || is_complex_expression(parts.when_true)
            || is_complex_expression(parts.when_false)
        {
            return None;
        }
        Some(parts)
    }
}

impl Rule for IfToConditional {
    fn name(&self) -> &'static str {
        "Simplify/IfToConditional"
    }

    fn description(&self) -> &'static str {
        "Replace if/else assignment with a conditional expression"
    }

    fn check_node(
        &self,
        tree: &SourceTree,
        node: &Node,
        config: &RuleConfig,
    ) -> Option<Diagnostic> {
        self.candidate(node)?;
        Some(self.diagnostic(
            tree,
            &node.span,
            config,
            "Use a conditional expression instead of if/else assignment.".to_string(),
        ))
    }

    fn fix(&self, node: &Node) -> Option<Node> {
        let parts = self.candidate(node)?;
        let conditional = Node::new(
            NodeKind::Conditional,
            None,
            vec![
                parts.condition.clone(),
                parts.when_true.clone(),
                parts.when_false.clone(),
            ],
        );
        let assignment = Node::new(
            NodeKind::Assignment,
            Some(parts.operator.to_string()),
            vec![parts.target.clone(), conditional],
        );
        Some(Node::new(
            NodeKind::ExpressionStatement,
            None,
            vec![assignment],
        ))
    }
}
