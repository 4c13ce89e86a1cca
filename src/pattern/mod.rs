//! Declarative structural patterns over tree nodes.
//!
//! A `Pattern` describes an expected subtree shape with wildcard holes,
//! optional holes, alternation, and named backreferences. Rules build their
//! patterns once and reuse them across every match attempt; matching is a
//! pure function over immutable inputs.

use crate::tree::{Node, NodeKind};

#[derive(Debug, Clone)]
pub enum Pattern {
    /// A concrete node: kind must equal, value must equal when given, and
    /// each child pattern must match the corresponding child slot.
    Fixed {
        kind: NodeKind,
        value: Option<String>,
        children: Vec<Pattern>,
    },
    /// Exactly one present node of any kind, bound under `name`.
    AnyNode { name: &'static str },
    /// One present node or an absent child slot, bound under `name`
    /// (absence binds the empty sequence).
    AnyNodeOrNull { name: &'static str },
    /// Matches only a slot structurally equal to the first binding of
    /// `name`. Never introduces a binding; an unbound name fails.
    Backreference { name: &'static str },
    /// Alternatives tried in listed order; the first success wins and a
    /// failed alternative leaks no captures.
    Choice(Vec<Pattern>),
}

impl Pattern {
    pub fn node(kind: NodeKind, children: Vec<Pattern>) -> Pattern {
        Pattern::Fixed {
            kind,
            value: None,
            children,
        }
    }

    pub fn node_with_value(kind: NodeKind, value: &str, children: Vec<Pattern>) -> Pattern {
        Pattern::Fixed {
            kind,
            value: Some(value.to_string()),
            children,
        }
    }

    pub fn any(name: &'static str) -> Pattern {
        Pattern::AnyNode { name }
    }

    pub fn any_or_absent(name: &'static str) -> Pattern {
        Pattern::AnyNodeOrNull { name }
    }

    pub fn backref(name: &'static str) -> Pattern {
        Pattern::Backreference { name }
    }

    pub fn choice(alternatives: Vec<Pattern>) -> Pattern {
        Pattern::Choice(alternatives)
    }
}

/// Named bindings produced by a successful match.
///
/// Bindings are recorded in the order the matcher visits them. Rebinding a
/// name succeeds only when the new value is structurally equal to the first
/// binding; equal rebinds append, so `get` exposes every occurrence.
#[derive(Debug, Clone, Default)]
pub struct Captures<'a> {
    bindings: Vec<(&'static str, Vec<&'a Node>)>,
}

impl<'a> Captures<'a> {
    /// All nodes of the first binding for `name`.
    pub fn get(&self, name: &str) -> Option<&[&'a Node]> {
        self.bindings
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, nodes)| nodes.as_slice())
    }

    /// The first node bound under `name`; `None` when unbound or bound to
    /// an absent slot.
    pub fn node(&self, name: &str) -> Option<&'a Node> {
        self.get(name).and_then(|nodes| nodes.first().copied())
    }

    /// Number of bindings recorded, counting rebinds.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    fn bind(&mut self, name: &'static str, nodes: Vec<&'a Node>) -> bool {
        if let Some((_, existing)) = self.bindings.iter().find(|(n, _)| *n == name) {
            let equal = existing.len() == nodes.len()
                && existing
                    .iter()
                    .zip(&nodes)
                    .all(|(a, b)| a.structurally_equal(b));
            if !equal {
                return false;
            }
        }
        self.bindings.push((name, nodes));
        true
    }
}

/// Match `pattern` against `node`. On success returns the capture table;
/// on failure returns `None` with no partial state.
pub fn match_pattern<'a>(pattern: &Pattern, node: &'a Node) -> Option<Captures<'a>> {
    let mut captures = Captures::default();
    if match_slot(pattern, Some(node), &mut captures) {
        Some(captures)
    } else {
        None
    }
}

/// Match one pattern against one child slot. `None` is an absent slot
/// (e.g. a missing argument); only `AnyNodeOrNull` and a `Backreference`
/// whose first binding is empty accept absence.
fn match_slot<'a>(pattern: &Pattern, slot: Option<&'a Node>, captures: &mut Captures<'a>) -> bool {
    match pattern {
        Pattern::Fixed {
            kind,
            value,
            children,
        } => {
            let Some(node) = slot else {
                return false;
            };
            if node.kind != *kind {
                return false;
            }
            if let Some(expected) = value {
                if node.value.as_deref() != Some(expected.as_str()) {
                    return false;
                }
            }
            if node.children.len() > children.len() {
                return false;
            }
            children
                .iter()
                .enumerate()
                .all(|(i, child)| match_slot(child, node.children.get(i), captures))
        }
        Pattern::AnyNode { name } => {
            let Some(node) = slot else {
                return false;
            };
            captures.bind(*name, vec![node])
        }
        Pattern::AnyNodeOrNull { name } => captures.bind(*name, slot.into_iter().collect()),
        Pattern::Backreference { name } => {
            let Some(bound) = captures.get(name) else {
                return false;
            };
            match (bound, slot) {
                ([], None) => true,
                ([first], Some(node)) => first.structurally_equal(node),
                _ => false,
            }
        }
        Pattern::Choice(alternatives) => {
            for alternative in alternatives {
                let mut attempt = captures.clone();
                if match_slot(alternative, slot, &mut attempt) {
                    *captures = attempt;
                    return true;
                }
            }
            false
        }
    }
}
