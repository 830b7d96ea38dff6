//! Library error type

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TidyError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8", path.display())]
    Decode { path: PathBuf },

    #[error("directory walk failed: {0}")]
    Walk(#[from] ignore::Error),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("invalid specifier pattern: {0}")]
    Pattern(String),

    #[error("regex engine error: {0}")]
    Regex(#[from] fancy_regex::Error),

    #[error("invalid exclude glob: {0}")]
    Glob(#[from] globset::Error),
}

