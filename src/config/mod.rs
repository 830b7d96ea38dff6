//! Configuration loading and merging
//!
//! Handles loading from config files and CLI arguments
//! with proper precedence (CLI > File > Defaults).

use crate::rewrite::specifier::DEFAULT_PATTERN;
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;

pub mod loader;
pub mod merge;

pub use loader::load_config;
pub use merge::{merge_cli_with_config, CliOverrides};

/// Extensions selected when nothing else is configured: plain and JSX-flavoured TypeScript.
pub fn default_extensions() -> Vec<String> {
    vec![".ts".to_string(), ".tsx".to_string()]
}

/// What to do when a single file cannot be read, decoded or written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop at the first failure and return it.
    #[default]
    Abort,
    /// Record the failure in the run report and move on.
    Continue,
}

/// Directory walk switches. Everything is off by default so the whole tree is visited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkOptions {
    pub respect_gitignore: bool,
    pub follow_symlinks: bool,
    pub exclude_globs: Vec<String>,
}

/// Fully resolved settings for one run over a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeConfig {
    pub root: PathBuf,
    pub extensions: Vec<String>,
    pub pattern: String,
    pub walk: WalkOptions,
    pub on_error: FailurePolicy,
}

impl NormalizeConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), ..Self::default() }
    }

    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    pub fn on_error(mut self, policy: FailurePolicy) -> Self {
        self.on_error = policy;
        self
    }

    pub fn walk(mut self, walk: WalkOptions) -> Self {
        self.walk = walk;
        self
    }
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            extensions: default_extensions(),
            pattern: DEFAULT_PATTERN.to_string(),
            walk: WalkOptions::default(),
            on_error: FailurePolicy::default(),
        }
    }
}

/// On-disk configuration (`import-tidy.toml` / `.yml`). Unset keys fall back to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    #[serde(deserialize_with = "deserialize_extensions")]
    pub extensions: Option<Vec<String>>,
    #[serde(deserialize_with = "deserialize_list")]
    pub exclude_globs: Option<Vec<String>>,
    pub respect_gitignore: Option<bool>,
    pub follow_symlinks: Option<bool>,
    pub pattern: Option<String>,
    pub on_error: Option<FailurePolicy>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrList {
    One(String),
    Many(Vec<String>),
}

impl StringOrList {
    fn into_items(self) -> Vec<String> {
        let raw = match self {
            Self::One(s) => s.split(',').map(str::to_string).collect(),
            Self::Many(items) => items,
        };
        raw.into_iter().map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect()
    }
}

fn deserialize_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<StringOrList>::deserialize(deserializer)?;
    Ok(value.map(StringOrList::into_items))
}

fn deserialize_extensions<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = deserialize_list(deserializer)?;
    Ok(items.map(|items| items.into_iter().map(|e| normalize_extension(&e)).collect()))
}

/// Add the leading dot to an extension when it is missing (`ts` -> `.ts`).
pub fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim();
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{}", ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_select_typescript() {
        let cfg = NormalizeConfig::default();
        assert_eq!(cfg.root, PathBuf::from("."));
        assert_eq!(cfg.extensions, vec![".ts", ".tsx"]);
        assert_eq!(cfg.pattern, DEFAULT_PATTERN);
        assert_eq!(cfg.on_error, FailurePolicy::Abort);
        assert!(!cfg.walk.respect_gitignore);
        assert!(!cfg.walk.follow_symlinks);
    }

    #[test]
    fn test_normalize_extension() {
        assert_eq!(normalize_extension("ts"), ".ts");
        assert_eq!(normalize_extension(" .tsx "), ".tsx");
        assert_eq!(normalize_extension("d.ts"), ".d.ts");
    }

    #[test]
    fn test_builder_overrides() {
        let cfg = NormalizeConfig::new("/tmp/project")
            .extensions([".js", ".jsx"])
            .on_error(FailurePolicy::Continue);
        assert_eq!(cfg.root, PathBuf::from("/tmp/project"));
        assert_eq!(cfg.extensions, vec![".js", ".jsx"]);
        assert_eq!(cfg.on_error, FailurePolicy::Continue);
    }
}
