use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "condense", version, about = "A syntax-tree conditional-simplification analyzer")]
pub struct Args {
    /// Tree documents or directories to analyze
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text", value_parser = ["text", "json", "quiet"])]
    pub format: String,

    /// Run only the specified rules (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// Exclude the specified rules (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub except: Vec<String>,

    /// Apply proposed rewrites and write the edited trees back to disk
    #[arg(short = 'a', long)]
    pub fix: bool,

    /// List all registered rule names, one per line, then exit
    #[arg(long)]
    pub list_rules: bool,

    /// Read one tree document from stdin, use PATH for display and config matching
    #[arg(long, value_name = "PATH")]
    pub stdin: Option<PathBuf>,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Stop after the first document with offenses
    #[arg(short = 'F', long)]
    pub fail_fast: bool,

    /// Disable color output (accepted for compatibility; output is plain)
    #[arg(long)]
    pub no_color: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::parse_from(["condense"]);
        assert_eq!(args.paths, vec![PathBuf::from(".")]);
        assert_eq!(args.format, "text");
        assert!(!args.fix);
        assert!(args.only.is_empty());
        assert!(args.stdin.is_none());
    }

    #[test]
    fn comma_delimited_rule_filters() {
        let args = Args::parse_from([
            "condense",
            "--only",
            "Simplify/IfToConditional,Simplify/FindOrDefault",
        ]);
        assert_eq!(args.only.len(), 2);
    }

    #[test]
    fn fix_flags() {
        assert!(Args::parse_from(["condense", "-a"]).fix);
        assert!(Args::parse_from(["condense", "--fix"]).fix);
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Args::try_parse_from(["condense", "--format", "xml"]).is_err());
    }
}
