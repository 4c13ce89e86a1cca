use std::io::Write;
use std::path::PathBuf;

use crate::diagnostic::Diagnostic;
use crate::formatter::Formatter;

pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn format_to(&self, diagnostics: &[Diagnostic], files: &[PathBuf], out: &mut dyn Write) {
        for d in diagnostics {
            let _ = writeln!(out, "{d}");
        }
        let offense_word = if diagnostics.len() == 1 {
            "offense"
        } else {
            "offenses"
        };
        let file_word = if files.len() == 1 { "file" } else { "files" };
        let fixed_count = diagnostics.iter().filter(|d| d.fixed).count();
        let _ = if fixed_count > 0 {
            writeln!(
                out,
                "\n{} {file_word} inspected, {} {offense_word} detected, {fixed_count} fixed",
                files.len(),
                diagnostics.len(),
            )
        } else {
            writeln!(
                out,
                "\n{} {file_word} inspected, {} {offense_word} detected",
                files.len(),
                diagnostics.len(),
            )
        };
    }
}
