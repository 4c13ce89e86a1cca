use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::diagnostic::Diagnostic;
use crate::rewrite::Rewrite;
use crate::rule::{Rule, RuleConfig};
use crate::tree::Node;
use crate::tree::document::SourceTree;

/// Cooperative cancellation signal checked between visited nodes.
///
/// Rules and the matcher stay cancellation-free; an abandoned traversal
/// simply stops visiting and leaves no partial mutation anywhere.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Depth-first traversal that runs every enabled rule on every node.
pub struct RuleWalker<'a> {
    tree: &'a SourceTree,
    /// Enabled rules with their registry index and resolved config.
    rules: Vec<(usize, &'a dyn Rule, RuleConfig)>,
    collect_rewrites: bool,
    pub diagnostics: Vec<Diagnostic>,
    pub rewrites: Vec<Rewrite>,
}

impl<'a> RuleWalker<'a> {
    pub fn new(
        tree: &'a SourceTree,
        rules: Vec<(usize, &'a dyn Rule, RuleConfig)>,
        collect_rewrites: bool,
    ) -> Self {
        Self {
            tree,
            rules,
            collect_rewrites,
            diagnostics: Vec::new(),
            rewrites: Vec::new(),
        }
    }

    pub fn walk(&mut self, cancel: &CancelToken) {
        let tree = self.tree;
        self.visit(&tree.root, cancel);
    }

    fn visit(&mut self, node: &'a Node, cancel: &CancelToken) {
        if cancel.is_cancelled() {
            return;
        }
        for (index, rule, config) in &self.rules {
            let Some(diagnostic) = rule.check_node(self.tree, node, config) else {
                continue;
            };
            if self.collect_rewrites {
                if let Some(replacement) = rule.fix(node) {
                    self.rewrites.push(Rewrite {
                        span: node.span,
                        replacement,
                        rule_name: rule.name(),
                        rule_index: *index,
                        description: rule.description().to_string(),
                    });
                }
            }
            self.diagnostics.push(diagnostic);
        }
        for child in &node.children {
            self.visit(child, cancel);
        }
    }
}
