//! Merging CLI flags on top of the config file

use super::{
    default_extensions, normalize_extension, FailurePolicy, FileConfig, NormalizeConfig,
    WalkOptions,
};
use crate::rewrite::specifier::DEFAULT_PATTERN;
use std::path::PathBuf;

/// Settings given on the command line. `None` / `false` means "not given".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub extensions: Option<Vec<String>>,
    pub exclude_globs: Option<Vec<String>>,
    pub respect_gitignore: bool,
    pub follow_symlinks: bool,
    pub pattern: Option<String>,
    pub keep_going: bool,
}

/// Resolve the final run settings. Precedence: CLI > file > defaults.
///
/// Boolean flags can only switch a behavior on; a file setting of `true` is not
/// undone by an absent flag.
pub fn merge_cli_with_config(
    root: PathBuf,
    file: FileConfig,
    cli: CliOverrides,
) -> NormalizeConfig {
    let extensions = cli
        .extensions
        .map(|exts| exts.iter().map(|e| normalize_extension(e)).collect())
        .or(file.extensions)
        .unwrap_or_else(default_extensions);

    let exclude_globs = cli.exclude_globs.or(file.exclude_globs).unwrap_or_default();

    let on_error = if cli.keep_going {
        FailurePolicy::Continue
    } else {
        file.on_error.unwrap_or_default()
    };

    NormalizeConfig {
        root,
        extensions,
        pattern: cli.pattern.or(file.pattern).unwrap_or_else(|| DEFAULT_PATTERN.to_string()),
        walk: WalkOptions {
            respect_gitignore: cli.respect_gitignore || file.respect_gitignore.unwrap_or(false),
            follow_symlinks: cli.follow_symlinks || file.follow_symlinks.unwrap_or(false),
            exclude_globs,
        },
        on_error,
    }
}
