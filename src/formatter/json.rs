use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;

use crate::diagnostic::Diagnostic;
use crate::formatter::Formatter;

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput {
    metadata: Metadata,
    offenses: Vec<Offense>,
}

#[derive(Serialize)]
struct Metadata {
    files_inspected: usize,
    offense_count: usize,
    fixed_count: usize,
}

#[derive(Serialize)]
struct Offense {
    path: String,
    line: usize,
    column: usize,
    severity: String,
    rule_name: String,
    message: String,
    fixed: bool,
}

impl Formatter for JsonFormatter {
    fn format_to(&self, diagnostics: &[Diagnostic], files: &[PathBuf], out: &mut dyn Write) {
        let fixed_count = diagnostics.iter().filter(|d| d.fixed).count();

        let output = JsonOutput {
            metadata: Metadata {
                files_inspected: files.len(),
                offense_count: diagnostics.len(),
                fixed_count,
            },
            offenses: diagnostics
                .iter()
                .map(|d| Offense {
                    path: d.path.clone(),
                    line: d.location.line,
                    column: d.location.column,
                    severity: d.severity.letter().to_string(),
                    rule_name: d.rule_name.clone(),
                    message: d.message.clone(),
                    fixed: d.fixed,
                })
                .collect(),
        };
        // Safe to unwrap: our types always serialize successfully
        let _ = writeln!(out, "{}", serde_json::to_string_pretty(&output).unwrap());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::{Location, Severity};

    fn render(diagnostics: &[Diagnostic], files: &[PathBuf]) -> serde_json::Value {
        let mut buf = Vec::new();
        JsonFormatter.format_to(diagnostics, files, &mut buf);
        serde_json::from_slice(&buf).unwrap()
    }

    #[test]
    fn empty_produces_valid_json() {
        let parsed = render(&[], &[]);
        assert_eq!(parsed["metadata"]["files_inspected"], 0);
        assert_eq!(parsed["metadata"]["offense_count"], 0);
        assert_eq!(parsed["offenses"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn offense_fields_present() {
        let d = Diagnostic {
            path: "foo.ast.json".to_string(),
            location: Location { line: 3, column: 5 },
            severity: Severity::Warning,
            rule_name: "Simplify/FindOrDefault".to_string(),
            message: "bad".to_string(),
            fixed: false,
        };
        let parsed = render(&[d], &[PathBuf::from("foo.ast.json")]);
        assert_eq!(parsed["metadata"]["files_inspected"], 1);
        assert_eq!(parsed["metadata"]["offense_count"], 1);
        let offense = &parsed["offenses"][0];
        assert_eq!(offense["path"], "foo.ast.json");
        assert_eq!(offense["line"], 3);
        assert_eq!(offense["column"], 5);
        assert_eq!(offense["severity"], "W");
        assert_eq!(offense["rule_name"], "Simplify/FindOrDefault");
        assert_eq!(offense["message"], "bad");
    }

    #[test]
    fn fixed_field_serialized() {
        let make = |line, fixed| Diagnostic {
            path: "a.ast.json".to_string(),
            location: Location { line, column: 0 },
            severity: Severity::Suggestion,
            rule_name: "Simplify/IfToConditional".to_string(),
            message: "m".to_string(),
            fixed,
        };
        let parsed = render(&[make(1, true), make(2, false)], &[PathBuf::from("a.ast.json")]);
        assert_eq!(parsed["metadata"]["fixed_count"], 1);
        assert_eq!(parsed["offenses"][0]["fixed"], true);
        assert_eq!(parsed["offenses"][1]["fixed"], false);
    }
}
