pub mod analyzer;
pub mod cli;
pub mod config;
pub mod diagnostic;
pub mod formatter;
pub mod fs;
pub mod pattern;
pub mod rewrite;
pub mod rule;
pub mod tree;

#[cfg(test)]
pub mod testutil;

use std::io::Read;

use anyhow::Result;

use analyzer::{analyze_tree, run_analyzer};
use cli::Args;
use config::load_config;
use formatter::create_formatter;
use fs::discover_files;
use rule::registry::RuleRegistry;
use rule::walker::CancelToken;
use tree::document::SourceTree;

/// Run the analyzer. Returns the exit code: 0 = clean, 1 = offenses found,
/// 2 = error.
pub fn run(args: Args) -> Result<i32> {
    let config = load_config(args.config.as_deref())?;

    if args.debug {
        eprintln!("debug: global excludes: {:?}", config.global_excludes());
    }

    let registry = RuleRegistry::default_registry();

    // --list-rules: print all registered rule names and exit
    if args.list_rules {
        let mut names = registry.names();
        names.sort();
        for name in names {
            println!("{name}");
        }
        return Ok(0);
    }

    // --stdin: read one tree document from stdin and analyze it
    if let Some(ref display_path) = args.stdin {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        let tree = SourceTree::from_json(display_path.clone(), &input)?;
        let (diagnostics, _) =
            analyze_tree(&tree, &config, &registry, &args, &CancelToken::new());
        let formatter = create_formatter(&args.format);
        formatter.print(&diagnostics, std::slice::from_ref(display_path));
        return if diagnostics.is_empty() { Ok(0) } else { Ok(1) };
    }

    let files = discover_files(&args.paths, &config)?;

    if args.debug {
        eprintln!("debug: {} documents to analyze", files.len());
        eprintln!("debug: {} rules registered", registry.len());
    }

    let result = run_analyzer(&files, &config, &registry, &args);
    let formatter = create_formatter(&args.format);
    formatter.print(&result.diagnostics, &files);

    if result.diagnostics.is_empty() {
        Ok(0)
    } else {
        Ok(1)
    }
}
