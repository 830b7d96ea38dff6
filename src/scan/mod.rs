//! File discovery

use crate::config::WalkOptions;
use crate::error::TidyError;
use std::path::{Path, PathBuf};

pub mod scanner;

pub use scanner::{FileScanner, ScanStats};

/// Walk `root` and return every file whose name ends in one of `extensions`, sorted by path.
pub fn discover_files(
    walk: &WalkOptions,
    root: &Path,
    extensions: &[String],
) -> Result<Vec<PathBuf>, TidyError> {
    FileScanner::with_walk_options(root.to_path_buf(), extensions.to_vec(), walk).scan()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_discover_files_uses_walk_options() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("generated")).unwrap();
        fs::write(root.join("generated/api.ts"), "").unwrap();
        fs::write(root.join("index.ts"), "").unwrap();
        fs::write(root.join("index.js"), "").unwrap();

        let walk = WalkOptions { exclude_globs: vec!["generated/**".into()], ..Default::default() };
        let files = discover_files(&walk, root, &[".ts".to_string(), ".js".to_string()]).unwrap();

        assert_eq!(files, vec![root.join("index.js"), root.join("index.ts")]);
    }
}
