//! `strip-versions` command

use anyhow::{Context, Result};
use clap::Args;
use std::path::Path;

use super::utils::{finish, resolve_config, TreeArgs};

#[derive(Args)]
pub struct StripArgs {
    #[command(flatten)]
    pub tree: TreeArgs,

    /// Specifier regex; must define a named group `body` (fancy-regex syntax)
    #[arg(long, value_name = "REGEX")]
    pub pattern: Option<String>,
}

pub fn run(args: StripArgs, config_path: Option<&Path>) -> Result<()> {
    let mut overrides = args.tree.overrides();
    overrides.pattern = args.pattern.clone();
    let config = resolve_config(&args.tree, config_path, overrides)?;

    let report = import_tidy::normalize(&config)
        .with_context(|| format!("Failed to normalize imports under {}", config.root.display()))?;

    tracing::debug!(
        "Scanned {} files, rewrote {} ({} specifiers)",
        report.scan.files_scanned,
        report.files_rewritten(),
        report.total_replacements()
    );
    finish(&report, "Import paths cleaned successfully.")
}
