//! `comment-unused` command

use anyhow::{Context, Result};
use clap::Args;
use std::path::Path;

use super::utils::{finish, resolve_config, TreeArgs};

#[derive(Args)]
pub struct UnusedArgs {
    #[command(flatten)]
    pub tree: TreeArgs,
}

pub fn run(args: UnusedArgs, config_path: Option<&Path>) -> Result<()> {
    let config = resolve_config(&args.tree, config_path, args.tree.overrides())?;

    let report = import_tidy::comment_unused(&config).with_context(|| {
        format!("Failed to comment unused imports under {}", config.root.display())
    })?;

    tracing::debug!(
        "Scanned {} files, commented {} imports in {} files",
        report.scan.files_scanned,
        report.total_replacements(),
        report.files_rewritten()
    );
    finish(&report, "Unused import fix complete.")
}
