use crate::rule::Rule;
use crate::tree::{Node, Span};

/// A proposed subtree replacement: swap the node at `span` for `replacement`.
#[derive(Debug, Clone)]
pub struct Rewrite {
    /// Span of the node being replaced, taken from the flagged node.
    pub span: Span,
    /// Freshly constructed replacement subtree (synthesized spans).
    pub replacement: Node,
    /// Rule that produced this rewrite.
    pub rule_name: &'static str,
    /// Registry index for deterministic conflict resolution (lower wins).
    pub rule_index: usize,
    pub description: String,
}

/// A set of non-conflicting rewrites, sorted by span start.
///
/// Built from an unsorted vec. A rewrite whose target span overlaps an
/// already-accepted one (including nesting) is dropped; when two rewrites
/// start at the same position, the one from the earlier rule in registry
/// order wins.
pub struct RewriteSet {
    rewrites: Vec<Rewrite>,
}

impl RewriteSet {
    pub fn from_vec(mut raw: Vec<Rewrite>) -> Self {
        raw.sort_by(|a, b| {
            a.span
                .start()
                .cmp(&b.span.start())
                .then(a.rule_index.cmp(&b.rule_index))
        });

        let mut accepted: Vec<Rewrite> = Vec::with_capacity(raw.len());
        for rewrite in raw {
            if accepted.iter().any(|a| a.span.overlaps(&rewrite.span)) {
                continue;
            }
            accepted.push(rewrite);
        }

        Self { rewrites: accepted }
    }

    /// Apply the rewrites to a tree, returning the edited copy.
    ///
    /// The input tree is never mutated. A rewrite whose span no longer
    /// names a node in the tree is skipped silently.
    pub fn apply(&self, root: &Node) -> Node {
        self.apply_node(root)
    }

    fn apply_node(&self, node: &Node) -> Node {
        if !node.span.is_synthesized() {
            if let Some(rewrite) = self.rewrites.iter().find(|r| r.span == node.span) {
                return rewrite.replacement.clone();
            }
        }
        Node {
            kind: node.kind,
            value: node.value.clone(),
            children: node.children.iter().map(|c| self.apply_node(c)).collect(),
            span: node.span,
        }
    }

    pub fn rewrites(&self) -> &[Rewrite] {
        &self.rewrites
    }

    pub fn is_empty(&self) -> bool {
        self.rewrites.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rewrites.len()
    }
}

/// Apply a single rule's fix at a previously reported location.
///
/// Re-locates the node at `span` and re-validates the rule against it, so a
/// stale location (the construct was edited away or changed since the
/// diagnostic was computed) returns `None` and leaves the tree untouched.
pub fn apply_fix(root: &Node, rule: &dyn Rule, span: &Span) -> Option<Node> {
    let target = root.find_by_span(span)?;
    let replacement = rule.fix(target)?;
    let set = RewriteSet::from_vec(vec![Rewrite {
        span: *span,
        replacement,
        rule_name: rule.name(),
        rule_index: 0,
        description: rule.description().to_string(),
    }]);
    Some(set.apply(root))
}
