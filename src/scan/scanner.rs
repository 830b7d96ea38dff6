//! File scanner implementation

use crate::config::WalkOptions;
use crate::error::TidyError;
use crate::utils::{has_extension, normalize_path};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::PathBuf;

/// Counters collected during one walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub files_scanned: usize,
    pub files_selected: usize,
    pub files_skipped_extension: usize,
    pub files_skipped_glob: usize,
    pub walk_errors: usize,
}

/// Discovers candidate files under a root directory.
///
/// With default settings every file is visited: hidden files are included,
/// ignore files are not consulted and symlinks are not followed.
pub struct FileScanner {
    root_path: PathBuf,
    include_extensions: Vec<String>,
    exclude_globs: Vec<String>,
    respect_gitignore: bool,
    follow_symlinks: bool,
    skip_walk_errors: bool,
    stats: ScanStats,
}

impl FileScanner {
    /// Create a new FileScanner with default settings.
    pub fn new(root_path: PathBuf) -> Self {
        Self {
            root_path,
            include_extensions: crate::config::default_extensions(),
            exclude_globs: Vec::new(),
            respect_gitignore: false,
            follow_symlinks: false,
            skip_walk_errors: false,
            stats: ScanStats::default(),
        }
    }

    /// Create a FileScanner selecting `extensions` and configured from `walk`.
    pub fn with_walk_options(
        root_path: PathBuf,
        extensions: Vec<String>,
        walk: &WalkOptions,
    ) -> Self {
        Self::new(root_path)
            .include_extensions(extensions)
            .exclude_globs(walk.exclude_globs.clone())
            .respect_gitignore(walk.respect_gitignore)
            .follow_symlinks(walk.follow_symlinks)
    }

    /// Set file name suffixes to select (e.g., ".ts", ".tsx")
    pub fn include_extensions(mut self, extensions: Vec<String>) -> Self {
        self.include_extensions = extensions;
        self
    }

    /// Set glob patterns to exclude, matched against the path relative to the root
    pub fn exclude_globs(mut self, globs: Vec<String>) -> Self {
        self.exclude_globs = globs;
        self
    }

    /// Set whether to respect gitignore files
    pub fn respect_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }

    /// Set whether to follow symbolic links
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Log and count walk errors instead of stopping at the first one
    pub fn skip_walk_errors(mut self, skip: bool) -> Self {
        self.skip_walk_errors = skip;
        self
    }

    fn build_exclude_globset(&self) -> Result<GlobSet, TidyError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude_globs {
            builder.add(Glob::new(pattern)?);
        }
        Ok(builder.build()?)
    }

    /// Scan the tree and return the selected files in sorted order.
    pub fn scan(&mut self) -> Result<Vec<PathBuf>, TidyError> {
        self.stats = ScanStats::default();

        if !self.root_path.is_dir() {
            return Err(TidyError::NotADirectory(self.root_path.clone()));
        }

        let exclude_globset = self.build_exclude_globset()?;

        let mut builder = WalkBuilder::new(&self.root_path);
        builder
            .standard_filters(false)
            .git_ignore(self.respect_gitignore)
            .git_global(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .parents(self.respect_gitignore)
            .require_git(false)
            .follow_links(self.follow_symlinks)
            .sort_by_file_name(|a, b| a.cmp(b));

        let mut files = Vec::new();

        for entry_result in builder.build() {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) if self.skip_walk_errors => {
                    tracing::warn!("Skipping unreadable entry: {}", err);
                    self.stats.walk_errors += 1;
                    continue;
                }
                Err(err) => return Err(err.into()),
            };

            let path = entry.path();

            // Skip directories (including symlinks to directories that are not followed)
            if path.is_dir() {
                continue;
            }

            self.stats.files_scanned += 1;

            if !self.exclude_globs.is_empty() {
                if let Ok(rel) = path.strip_prefix(&self.root_path) {
                    let rel_path = normalize_path(&rel.to_string_lossy());
                    if exclude_globset.is_match(&rel_path) {
                        tracing::debug!("Excluded by glob: {}", rel_path);
                        self.stats.files_skipped_glob += 1;
                        continue;
                    }
                }
            }

            if !has_extension(path, &self.include_extensions) {
                self.stats.files_skipped_extension += 1;
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        self.stats.files_selected = files.len();

        Ok(files)
    }

    /// Get scanning statistics
    pub fn stats(&self) -> &ScanStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn names(files: &[PathBuf], root: &std::path::Path) -> Vec<String> {
        files
            .iter()
            .map(|p| normalize_path(&p.strip_prefix(root).unwrap().to_string_lossy()))
            .collect()
    }

    #[test]
    fn test_scanner_selects_default_extensions() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::write(root.join("a.ts"), "").unwrap();
        fs::write(root.join("b.tsx"), "").unwrap();
        fs::write(root.join("c.js"), "").unwrap();
        fs::write(root.join("readme.md"), "").unwrap();

        let mut scanner = FileScanner::new(root.to_path_buf());
        let files = scanner.scan().unwrap();

        assert_eq!(names(&files, root), vec!["a.ts", "b.tsx"]);
        let stats = scanner.stats();
        assert_eq!(stats.files_scanned, 4);
        assert_eq!(stats.files_selected, 2);
        assert_eq!(stats.files_skipped_extension, 2);
    }

    #[test]
    fn test_scanner_descends_everywhere_by_default() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("src/components/deep")).unwrap();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::create_dir_all(root.join(".hidden")).unwrap();
        fs::write(root.join("src/components/deep/x.tsx"), "").unwrap();
        fs::write(root.join("node_modules/pkg/index.ts"), "").unwrap();
        fs::write(root.join(".hidden/h.ts"), "").unwrap();
        fs::write(root.join(".gitignore"), "node_modules/\n").unwrap();

        let files = FileScanner::new(root.to_path_buf()).scan().unwrap();

        assert_eq!(
            names(&files, root),
            vec![".hidden/h.ts", "node_modules/pkg/index.ts", "src/components/deep/x.tsx"]
        );
    }

    #[test]
    fn test_scanner_respects_gitignore_when_asked() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::write(root.join("node_modules/pkg/index.ts"), "").unwrap();
        fs::write(root.join("main.ts"), "").unwrap();
        fs::write(root.join(".gitignore"), "node_modules/\n").unwrap();

        let files = FileScanner::new(root.to_path_buf()).respect_gitignore(true).scan().unwrap();

        assert_eq!(names(&files, root), vec!["main.ts"]);
    }

    #[test]
    fn test_scanner_exclude_globs() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("dist")).unwrap();
        fs::write(root.join("dist/bundle.ts"), "").unwrap();
        fs::write(root.join("main.ts"), "").unwrap();

        let mut scanner =
            FileScanner::new(root.to_path_buf()).exclude_globs(vec!["dist/**".to_string()]);
        let files = scanner.scan().unwrap();

        assert_eq!(names(&files, root), vec!["main.ts"]);
        assert_eq!(scanner.stats().files_skipped_glob, 1);
    }

    #[test]
    fn test_scanner_invalid_glob_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let result =
            FileScanner::new(temp_dir.path().to_path_buf()).exclude_globs(vec!["[".into()]).scan();
        assert!(matches!(result, Err(TidyError::Glob(_))));
    }

    #[test]
    fn test_scanner_root_must_be_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.ts");
        fs::write(&file, "").unwrap();

        let result = FileScanner::new(file).scan();
        assert!(matches!(result, Err(TidyError::NotADirectory(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_scanner_symlinked_dirs_only_when_following() {
        let temp_dir = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::write(outside.path().join("linked.ts"), "").unwrap();
        std::os::unix::fs::symlink(outside.path(), root.join("vendor")).unwrap();

        let files = FileScanner::new(root.to_path_buf()).scan().unwrap();
        assert!(files.is_empty());

        let files = FileScanner::new(root.to_path_buf()).follow_symlinks(true).scan().unwrap();
        assert_eq!(names(&files, root), vec!["vendor/linked.ts"]);
    }

    /// Lock `dir` with mode 000. Returns false when the lock has no effect,
    /// which is the case when the tests run as root.
    #[cfg(unix)]
    fn lock_dir(dir: &std::path::Path) -> bool {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, fs::Permissions::from_mode(0o000)).unwrap();
        if fs::read_dir(dir).is_ok() {
            unlock_dir(dir);
            return false;
        }
        true
    }

    #[cfg(unix)]
    fn unlock_dir(dir: &std::path::Path) {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_scanner_counts_unreadable_dirs_when_skipping() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let locked = root.join("locked");

        fs::create_dir_all(&locked).unwrap();
        fs::write(locked.join("hidden.ts"), "").unwrap();
        fs::write(root.join("open.ts"), "").unwrap();
        if !lock_dir(&locked) {
            return;
        }

        let mut scanner = FileScanner::new(root.to_path_buf()).skip_walk_errors(true);
        let skipped = scanner.scan();
        let strict = FileScanner::new(root.to_path_buf()).scan();
        unlock_dir(&locked);

        assert_eq!(names(&skipped.unwrap(), root), vec!["open.ts"]);
        assert_eq!(scanner.stats().walk_errors, 1);
        assert!(matches!(strict, Err(TidyError::Walk(_))));
    }

    #[test]
    fn test_scanner_with_walk_options() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("dist")).unwrap();
        fs::write(root.join("dist/bundle.js"), "").unwrap();
        fs::write(root.join("main.js"), "").unwrap();
        fs::write(root.join("main.ts"), "").unwrap();

        let walk = WalkOptions { exclude_globs: vec!["dist/**".into()], ..Default::default() };
        let files =
            FileScanner::with_walk_options(root.to_path_buf(), vec![".js".into()], &walk)
                .scan()
                .unwrap();

        assert_eq!(names(&files, root), vec!["main.js"]);
    }
}
