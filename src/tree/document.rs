use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::Node;

/// One parsed document: a display path plus the root of its syntax tree.
#[derive(Debug)]
pub struct SourceTree {
    pub path: PathBuf,
    pub root: Node,
}

impl SourceTree {
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let root: Node = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse tree {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            root,
        })
    }

    /// Build a document from a JSON string, using the given path for
    /// display purposes (stdin mode).
    pub fn from_json(path: PathBuf, contents: &str) -> Result<Self> {
        let root: Node = serde_json::from_str(contents)
            .with_context(|| format!("failed to parse tree {}", path.display()))?;
        Ok(Self { path, root })
    }

    /// Build a document directly from a root node (for testing).
    #[cfg(test)]
    pub fn from_root(path: &str, root: Node) -> Self {
        Self {
            path: PathBuf::from(path),
            root,
        }
    }

    pub fn path_str(&self) -> &str {
        self.path.to_str().unwrap_or("<non-utf8 path>")
    }
}
