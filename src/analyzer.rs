use std::path::PathBuf;

use rayon::prelude::*;

use crate::cli::Args;
use crate::config::ResolvedConfig;
use crate::diagnostic::{Diagnostic, Location, Severity};
use crate::rewrite::{Rewrite, RewriteSet};
use crate::rule::registry::RuleRegistry;
use crate::rule::walker::{CancelToken, RuleWalker};
use crate::tree::document::SourceTree;

pub struct AnalyzeResult {
    pub diagnostics: Vec<Diagnostic>,
    pub file_count: usize,
    pub fixed_count: usize,
}

/// Analyze a single loaded document. Returns its diagnostics plus the
/// proposed rewrites when fix mode is on.
pub fn analyze_tree(
    tree: &SourceTree,
    config: &ResolvedConfig,
    registry: &RuleRegistry,
    args: &Args,
    cancel: &CancelToken,
) -> (Vec<Diagnostic>, Vec<Rewrite>) {
    let path = tree.path_str();
    let mut rules = Vec::new();
    for (index, rule) in registry.rules().iter().enumerate() {
        let name = rule.name();
        if !args.only.is_empty() && !args.only.iter().any(|only| only == name) {
            continue;
        }
        if args.except.iter().any(|except| except == name) {
            continue;
        }
        if !config.is_rule_enabled(name) {
            continue;
        }
        let rule_config = config.rule_config(name);
        if !rule_config.applies_to(path) {
            continue;
        }
        rules.push((index, rule.as_ref(), rule_config));
    }

    let mut walker = RuleWalker::new(tree, rules, args.fix);
    walker.walk(cancel);
    (walker.diagnostics, walker.rewrites)
}

/// Analyze all discovered documents, in parallel. In fix mode, accepted
/// rewrites are applied and the edited trees written back to disk.
pub fn run_analyzer(
    files: &[PathBuf],
    config: &ResolvedConfig,
    registry: &RuleRegistry,
    args: &Args,
) -> AnalyzeResult {
    let start = std::time::Instant::now();
    let cancel = CancelToken::new();

    let per_file: Vec<(Vec<Diagnostic>, usize)> = files
        .par_iter()
        .map(|path| {
            if cancel.is_cancelled() {
                return (Vec::new(), 0);
            }
            let tree = match SourceTree::from_path(path) {
                Ok(tree) => tree,
                Err(err) => {
                    return (vec![load_error_diagnostic(path, &err)], 0);
                }
            };
            let (mut diagnostics, rewrites) = analyze_tree(&tree, config, registry, args, &cancel);

            let mut fixed_count = 0;
            if args.fix && !rewrites.is_empty() {
                let set = RewriteSet::from_vec(rewrites);
                if write_fixed_tree(&tree, &set) {
                    fixed_count = set.len();
                    mark_fixed(&mut diagnostics, &set);
                }
            }

            if args.fail_fast && !diagnostics.is_empty() {
                cancel.cancel();
            }
            (diagnostics, fixed_count)
        })
        .collect();

    let mut diagnostics = Vec::new();
    let mut fixed_count = 0;
    for (file_diagnostics, file_fixed) in per_file {
        diagnostics.extend(file_diagnostics);
        fixed_count += file_fixed;
    }
    diagnostics.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

    if args.debug {
        eprintln!(
            "debug: analyzed {} files with {} rules in {:.0?}",
            files.len(),
            registry.len(),
            start.elapsed(),
        );
    }

    AnalyzeResult {
        diagnostics,
        file_count: files.len(),
        fixed_count,
    }
}

fn load_error_diagnostic(path: &PathBuf, err: &anyhow::Error) -> Diagnostic {
    Diagnostic {
        path: path.to_str().unwrap_or("<non-utf8 path>").to_string(),
        location: Location { line: 1, column: 0 },
        severity: Severity::Fatal,
        rule_name: "Lint/InvalidTree".to_string(),
        message: format!("{err:#}"),
        fixed: false,
    }
}

fn write_fixed_tree(tree: &SourceTree, set: &RewriteSet) -> bool {
    let edited = set.apply(&tree.root);
    // Safe to unwrap: Node always serializes successfully
    let json = serde_json::to_string_pretty(&edited).unwrap();
    match std::fs::write(&tree.path, json + "\n") {
        Ok(()) => true,
        Err(err) => {
            eprintln!(
                "warning: failed to write fixed tree {}: {err}",
                tree.path.display()
            );
            false
        }
    }
}

/// Mark each diagnostic whose rule produced an accepted rewrite at the
/// diagnostic's location.
fn mark_fixed(diagnostics: &mut [Diagnostic], set: &RewriteSet) {
    for diagnostic in diagnostics {
        let fixed = set.rewrites().iter().any(|rewrite| {
            rewrite.rule_name == diagnostic.rule_name
                && rewrite.span.start() == (diagnostic.location.line, diagnostic.location.column)
        });
        if fixed {
            diagnostic.fixed = true;
        }
    }
}
