use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde_yml::Value;

use crate::diagnostic::Severity;
use crate::rule::RuleConfig;

/// Resolved configuration from .condense.yml.
///
/// Reads a single YAML file and extracts per-rule
/// Enabled/Severity/Exclude/Include plus AllRules.Exclude.
#[derive(Debug)]
pub struct ResolvedConfig {
    /// Per-rule configs keyed by rule name (e.g. "Simplify/FindOrDefault")
    rule_configs: HashMap<String, RuleConfig>,
    global_excludes: Vec<String>,
}

impl ResolvedConfig {
    fn empty() -> Self {
        Self {
            rule_configs: HashMap::new(),
            global_excludes: Vec::new(),
        }
    }

    /// Check if a rule is enabled.
    pub fn is_rule_enabled(&self, name: &str) -> bool {
        match self.rule_configs.get(name) {
            Some(config) => config.enabled,
            None => true, // enabled by default
        }
    }

    /// Get the resolved config for a specific rule.
    pub fn rule_config(&self, name: &str) -> RuleConfig {
        self.rule_configs.get(name).cloned().unwrap_or_default()
    }

    /// Global exclude patterns from AllRules.Exclude.
    pub fn global_excludes(&self) -> &[String] {
        &self.global_excludes
    }
}

/// Load config from the given path, or look for `.condense.yml` in the
/// current directory. Returns an empty config if the file doesn't exist.
pub fn load_config(path: Option<&Path>) -> Result<ResolvedConfig> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => Path::new(".condense.yml").to_path_buf(),
    };

    if !config_path.exists() {
        return Ok(ResolvedConfig::empty());
    }

    let contents = std::fs::read_to_string(&config_path)
        .with_context(|| format!("failed to read config {}", config_path.display()))?;
    let raw: Value =
        serde_yml::from_str(&contents).with_context(|| "failed to parse .condense.yml")?;

    let mut rule_configs = HashMap::new();
    let mut global_excludes = Vec::new();

    if let Value::Mapping(map) = &raw {
        for (key, value) in map {
            let key_str = match key.as_str() {
                Some(s) => s,
                None => continue,
            };

            if key_str == "AllRules" {
                if let Some(excludes) = extract_string_list(value, "Exclude") {
                    global_excludes = excludes;
                }
                continue;
            }

            // Rule names contain "/" (e.g. "Simplify/IfToConditional")
            if key_str.contains('/') {
                rule_configs.insert(key_str.to_string(), parse_rule_config(value));
            }
        }
    }

    Ok(ResolvedConfig {
        rule_configs,
        global_excludes,
    })
}

fn parse_rule_config(value: &Value) -> RuleConfig {
    let mut config = RuleConfig::default();

    if let Value::Mapping(map) = value {
        for (k, v) in map {
            let key = match k.as_str() {
                Some(s) => s,
                None => continue,
            };
            match key {
                "Enabled" => {
                    if let Some(b) = v.as_bool() {
                        config.enabled = b;
                    }
                }
                "Severity" => {
                    if let Some(s) = v.as_str() {
                        config.severity = Severity::from_str(s);
                    }
                }
                "Exclude" => {
                    if let Some(list) = value_to_string_list(v) {
                        config.exclude = list;
                    }
                }
                "Include" => {
                    if let Some(list) = value_to_string_list(v) {
                        config.include = list;
                    }
                }
                _ => {
                    config.options.insert(key.to_string(), v.clone());
                }
            }
        }
    }

    config
}

fn extract_string_list(value: &Value, key: &str) -> Option<Vec<String>> {
    value
        .as_mapping()?
        .get(Value::String(key.to_string()))
        .and_then(value_to_string_list)
}

fn value_to_string_list(value: &Value) -> Option<Vec<String>> {
    Some(
        value
            .as_sequence()?
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = load_config(Some(Path::new("/nonexistent/.condense.yml"))).unwrap();
        assert!(config.is_rule_enabled("Simplify/IfToConditional"));
        assert!(config.global_excludes().is_empty());
        assert!(config.rule_config("Simplify/IfToConditional").enabled);
    }

    #[test]
    fn disabled_rule_is_read() {
        let file = write_config("Simplify/IfToConditional:\n  Enabled: false\n");
        let config = load_config(Some(file.path())).unwrap();
        assert!(!config.is_rule_enabled("Simplify/IfToConditional"));
        assert!(config.is_rule_enabled("Simplify/FindOrDefault"));
    }

    #[test]
    fn severity_override_is_read() {
        let file = write_config("Simplify/FindOrDefault:\n  Severity: warning\n");
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(
            config.rule_config("Simplify/FindOrDefault").severity,
            Some(Severity::Warning)
        );
    }

    #[test]
    fn global_excludes_are_read() {
        let file = write_config("AllRules:\n  Exclude:\n    - 'generated/**'\n    - 'vendor/**'\n");
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.global_excludes(), ["generated/**", "vendor/**"]);
    }

    #[test]
    fn per_rule_excludes_and_options_are_read() {
        let file = write_config(
            "Simplify/IfToConditional:\n  Exclude:\n    - 'legacy/**'\n  MaxBranchWidth: 3\n",
        );
        let config = load_config(Some(file.path())).unwrap();
        let rule = config.rule_config("Simplify/IfToConditional");
        assert_eq!(rule.exclude, ["legacy/**"]);
        assert!(rule.options.contains_key("MaxBranchWidth"));
    }

    #[test]
    fn keys_without_slash_are_not_rules() {
        let file = write_config("Banner: hello\nSimplify/FindOrDefault:\n  Enabled: true\n");
        let config = load_config(Some(file.path())).unwrap();
        assert!(config.is_rule_enabled("Simplify/FindOrDefault"));
        // "Banner" is silently ignored
        assert!(config.is_rule_enabled("Banner"));
    }

    #[test]
    fn malformed_yaml_errors() {
        let file = write_config(":\n  - [unbalanced");
        assert!(load_config(Some(file.path())).is_err());
    }
}
