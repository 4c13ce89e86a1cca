pub mod complexity;
pub mod registry;
pub mod simplify;
pub mod walker;

use std::collections::HashMap;

use crate::diagnostic::{Diagnostic, Location, Severity};
use crate::tree::document::SourceTree;
use crate::tree::{Node, Span};

/// Per-rule configuration extracted from .condense.yml.
#[derive(Debug, Clone)]
pub struct RuleConfig {
    pub enabled: bool,
    pub severity: Option<Severity>,
    pub exclude: Vec<String>,
    pub include: Vec<String>,
    pub options: HashMap<String, serde_yml::Value>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: None,
            exclude: Vec::new(),
            include: Vec::new(),
            options: HashMap::new(),
        }
    }
}

impl RuleConfig {
    /// Whether this rule runs on the given document path, per the
    /// Include/Exclude glob patterns.
    pub fn applies_to(&self, path: &str) -> bool {
        if !self.include.is_empty() && !matches_any(&self.include, path) {
            return false;
        }
        !matches_any(&self.exclude, path)
    }
}

fn matches_any(patterns: &[String], path: &str) -> bool {
    patterns.iter().any(|pattern| {
        globset::Glob::new(pattern)
            .map(|g| g.compile_matcher().is_match(path))
            .unwrap_or(false)
    })
}

/// A rewrite rule. Implementations must be Send + Sync so they can be
/// shared across rayon worker threads; each instance owns its identifier,
/// message, and severity as plain data.
pub trait Rule: Send + Sync {
    /// The fully-qualified rule name, e.g. "Simplify/IfToConditional".
    fn name(&self) -> &'static str;

    /// Short description of the rewrite, shown when a fix is applied.
    fn description(&self) -> &'static str;

    fn default_severity(&self) -> Severity {
        Severity::Suggestion
    }

    /// Node-based check — called for every tree node during traversal.
    /// Returns a diagnostic when the rule applies, `None` otherwise.
    fn check_node(
        &self,
        tree: &SourceTree,
        node: &Node,
        config: &RuleConfig,
    ) -> Option<Diagnostic>;

    /// Build the replacement subtree for a node this rule flags.
    /// Must re-validate: returns `None` when the rule does not apply to
    /// `node`, so a fix at a stale location is a no-op.
    fn fix(&self, node: &Node) -> Option<Node>;

    fn diagnostic(
        &self,
        tree: &SourceTree,
        span: &Span,
        config: &RuleConfig,
        message: String,
    ) -> Diagnostic {
        Diagnostic {
            path: tree.path_str().to_string(),
            location: Location {
                line: span.start_line,
                column: span.start_column,
            },
            severity: config.severity.unwrap_or_else(|| self.default_severity()),
            rule_name: self.name().to_string(),
            message,
            fixed: false,
        }
    }
}
