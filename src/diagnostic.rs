use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Suggestion,
    Warning,
    Error,
    Fatal,
}

impl Severity {
    pub fn letter(&self) -> char {
        match self {
            Severity::Suggestion => 'S',
            Severity::Warning => 'W',
            Severity::Error => 'E',
            Severity::Fatal => 'F',
        }
    }

    pub fn from_str(s: &str) -> Option<Severity> {
        match s.to_lowercase().as_str() {
            "suggestion" => Some(Severity::Suggestion),
            "warning" => Some(Severity::Warning),
            "error" => Some(Severity::Error),
            "fatal" => Some(Severity::Fatal),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// 1-indexed line number
    pub line: usize,
    /// 0-indexed column
    pub column: usize,
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub path: String,
    pub location: Location,
    pub severity: Severity,
    pub rule_name: String,
    pub message: String,
    /// True once the proposed rewrite has been applied to the document.
    pub fixed: bool,
}

impl Diagnostic {
    pub fn sort_key(&self) -> (&str, usize, usize) {
        (&self.path, self.location.line, self.location.column)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}: {}: {}",
            self.path,
            self.location.line,
            self.location.column,
            self.severity,
            self.rule_name,
            self.message,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_letters() {
        assert_eq!(Severity::Suggestion.letter(), 'S');
        assert_eq!(Severity::Warning.letter(), 'W');
        assert_eq!(Severity::Error.letter(), 'E');
        assert_eq!(Severity::Fatal.letter(), 'F');
    }

    #[test]
    fn severity_from_str() {
        assert_eq!(Severity::from_str("suggestion"), Some(Severity::Suggestion));
        assert_eq!(Severity::from_str("Warning"), Some(Severity::Warning));
        assert_eq!(Severity::from_str("ERROR"), Some(Severity::Error));
        assert_eq!(Severity::from_str("fatal"), Some(Severity::Fatal));
        assert_eq!(Severity::from_str("unknown"), None);
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Suggestion < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
    }

    #[test]
    fn diagnostic_display() {
        let d = Diagnostic {
            path: "foo.ast.json".to_string(),
            location: Location { line: 3, column: 5 },
            severity: Severity::Suggestion,
            rule_name: "Simplify/IfToConditional".to_string(),
            message: "reducible".to_string(),
            fixed: false,
        };
        assert_eq!(
            format!("{d}"),
            "foo.ast.json:3:5: S: Simplify/IfToConditional: reducible"
        );
    }

    #[test]
    fn diagnostic_sort_key() {
        let make = |path: &str, line| Diagnostic {
            path: path.to_string(),
            location: Location { line, column: 0 },
            severity: Severity::Suggestion,
            rule_name: "X".to_string(),
            message: "m".to_string(),
            fixed: false,
        };
        let d1 = make("a.ast.json", 1);
        let d2 = make("a.ast.json", 2);
        let d3 = make("b.ast.json", 1);
        assert!(d1.sort_key() < d2.sort_key());
        assert!(d2.sort_key() < d3.sort_key());
    }
}
