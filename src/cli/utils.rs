//! Shared CLI utilities.

use anyhow::{bail, Result};
use clap::Args;
use import_tidy::config::{load_config, merge_cli_with_config, CliOverrides};
use import_tidy::{NormalizeConfig, RunReport};
use std::path::{Path, PathBuf};

/// Arguments common to every subcommand that walks a tree.
#[derive(Args)]
pub struct TreeArgs {
    /// Root directory to process
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Only process files with these extensions (comma-separated)
    #[arg(short = 'i', long, value_name = "EXTS")]
    pub include_ext: Option<String>,

    /// Skip paths matching these globs (comma-separated)
    #[arg(short = 'e', long, value_name = "GLOBS")]
    pub exclude_glob: Option<String>,

    /// Honor .gitignore rules
    #[arg(long)]
    pub respect_gitignore: bool,

    /// Follow symbolic links when walking
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Keep going after a file fails, then exit non-zero
    #[arg(long)]
    pub keep_going: bool,
}

impl TreeArgs {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            extensions: parse_csv(&self.include_ext),
            exclude_globs: parse_csv(&self.exclude_glob),
            respect_gitignore: self.respect_gitignore,
            follow_symlinks: self.follow_symlinks,
            pattern: None,
            keep_going: self.keep_going,
        }
    }
}

/// Load the config file for the tree and apply CLI overrides on top.
pub fn resolve_config(
    args: &TreeArgs,
    config_path: Option<&Path>,
    overrides: CliOverrides,
) -> Result<NormalizeConfig> {
    if !args.path.is_dir() {
        bail!("Path is not a directory: {}", args.path.display());
    }
    let file = load_config(&args.path, config_path)?;
    Ok(merge_cli_with_config(args.path.clone(), file, overrides))
}

/// Turn recorded per-file failures into a non-zero exit.
pub fn finish(report: &RunReport, success_line: &str) -> Result<()> {
    if report.has_failures() {
        for (path, error) in report.failures() {
            eprintln!("failed: {}: {}", path.display(), error);
        }
        bail!(
            "{} file(s) could not be processed, {} unreadable walk entries",
            report.failures().count(),
            report.scan.walk_errors
        );
    }
    println!("{}", success_line);
    Ok(())
}

/// Parse a comma-separated string into a `Vec<String>`, trimming whitespace and
/// discarding empty segments.  Returns `None` when `value` is `None`.
pub fn parse_csv(value: &Option<String>) -> Option<Vec<String>> {
    value.as_ref().map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| part.to_string())
            .collect::<Vec<_>>()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv() {
        assert_eq!(parse_csv(&None), None);
        assert_eq!(
            parse_csv(&Some(" .ts, tsx ,,".to_string())),
            Some(vec![".ts".to_string(), "tsx".to_string()])
        );
    }
}
