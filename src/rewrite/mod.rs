//! In-place rewriting of source files
//!
//! Both passes share one driver: discover files, then read, transform and
//! write each file in turn. Failures either stop the run or are recorded,
//! depending on [`FailurePolicy`].

use crate::config::{FailurePolicy, NormalizeConfig};
use crate::error::TidyError;
use crate::scan::{FileScanner, ScanStats};
use std::fs;
use std::path::{Path, PathBuf};

pub mod specifier;
pub mod unused_imports;

pub use specifier::{rewrite_specifiers, strip_version, SpecifierPattern};
pub use unused_imports::comment_unused_imports;

/// One replaced fragment of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub before: String,
    pub after: String,
}

/// Result of transforming one text buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub content: String,
    pub edits: Vec<Edit>,
}

impl Rewrite {
    pub fn replacements(&self) -> usize {
        self.edits.len()
    }
}

/// What happened to a single selected file.
#[derive(Debug)]
pub enum FileOutcome {
    Rewritten { path: PathBuf, replacements: usize },
    Unchanged { path: PathBuf },
    Failed { path: PathBuf, error: TidyError },
}

impl FileOutcome {
    pub fn path(&self) -> &Path {
        match self {
            Self::Rewritten { path, .. } | Self::Unchanged { path } | Self::Failed { path, .. } => {
                path
            }
        }
    }
}

/// Per-run summary, in the order files were processed.
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<FileOutcome>,
    pub scan: ScanStats,
}

impl RunReport {
    pub fn files_rewritten(&self) -> usize {
        self.outcomes.iter().filter(|o| matches!(o, FileOutcome::Rewritten { .. })).count()
    }

    pub fn total_replacements(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o {
                FileOutcome::Rewritten { replacements, .. } => *replacements,
                _ => 0,
            })
            .sum()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Path, &TidyError)> {
        self.outcomes.iter().filter_map(|o| match o {
            FileOutcome::Failed { path, error } => Some((path.as_path(), error)),
            _ => None,
        })
    }

    /// True when any file failed or part of the tree could not be walked.
    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some() || self.scan.walk_errors > 0
    }
}

/// Strip version suffixes from quoted specifiers in every selected file under the root.
pub fn normalize(config: &NormalizeConfig) -> Result<RunReport, TidyError> {
    let pattern = SpecifierPattern::new(&config.pattern)?;
    tracing::debug!("Using specifier pattern {} ({})", pattern.as_str(), pattern.engine());
    process_tree(config, "Fixed imports in", |content| rewrite_specifiers(content, &pattern))
}

/// Comment out unused single-line imports in every selected file under the root.
pub fn comment_unused(config: &NormalizeConfig) -> Result<RunReport, TidyError> {
    process_tree(config, "Commented unused imports in", |content| {
        Ok(comment_unused_imports(content))
    })
}

fn process_tree<F>(
    config: &NormalizeConfig,
    label: &str,
    mut transform: F,
) -> Result<RunReport, TidyError>
where
    F: FnMut(&str) -> Result<Rewrite, TidyError>,
{
    let keep_going = config.on_error == FailurePolicy::Continue;

    let mut scanner =
        FileScanner::with_walk_options(config.root.clone(), config.extensions.clone(), &config.walk)
            .skip_walk_errors(keep_going);
    let files = scanner.scan()?;

    let mut report =
        RunReport { outcomes: Vec::with_capacity(files.len()), scan: scanner.stats().clone() };

    for path in files {
        tracing::debug!("Processing {}", path.display());
        match process_file(&path, &mut transform) {
            Ok(Some(rewrite)) => {
                tracing::info!("{}: {} ({} edits)", label, path.display(), rewrite.replacements());
                for edit in &rewrite.edits {
                    tracing::debug!("  {} -> {}", edit.before.trim(), edit.after.trim());
                }
                report
                    .outcomes
                    .push(FileOutcome::Rewritten { path, replacements: rewrite.replacements() });
            }
            Ok(None) => report.outcomes.push(FileOutcome::Unchanged { path }),
            Err(error) if keep_going => {
                tracing::warn!("{}", error);
                report.outcomes.push(FileOutcome::Failed { path, error });
            }
            Err(error) => return Err(error),
        }
    }

    Ok(report)
}

/// Read, transform and write back one file. `None` means the content did not change
/// and nothing was written.
fn process_file<F>(path: &Path, transform: &mut F) -> Result<Option<Rewrite>, TidyError>
where
    F: FnMut(&str) -> Result<Rewrite, TidyError>,
{
    let bytes =
        fs::read(path).map_err(|source| TidyError::Read { path: path.to_path_buf(), source })?;
    let content =
        String::from_utf8(bytes).map_err(|_| TidyError::Decode { path: path.to_path_buf() })?;

    let rewrite = transform(&content)?;
    if rewrite.content == content {
        return Ok(None);
    }

    fs::write(path, &rewrite.content)
        .map_err(|source| TidyError::Write { path: path.to_path_buf(), source })?;
    Ok(Some(rewrite))
}
