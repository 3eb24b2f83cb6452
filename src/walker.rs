//! # Tree Walker Module
//!
//! Questo modulo gestisce la discovery dei file sotto la input root.
//!
//! ## Responsabilità:
//! - Enumerazione ricorsiva dei file per categoria (path relativi)
//! - Ordine di enumerazione stabile: i risultati sono ordinati per path,
//!   mai dipendenti dall'ordine delle directory entry del filesystem
//! - Esclusione esplicita della output root quando è annidata nella input
//!   root (evita di ri-ottimizzare l'output di una run precedente)
//!
//! ## Policy:
//! - Directory symlinked non vengono seguite (niente ricorsione infinita)
//! - Root inesistente → `IOError`; root senza match → lista vuota
//!
//! ## Esempio:
//! ```no_run
//! use static_asset_optimizer::{AssetCategory, TreeWalker};
//!
//! # fn demo() -> Result<(), static_asset_optimizer::OptimizeError> {
//! let walker = TreeWalker::new("./site").skip_subtree("./site/dist");
//! let tasks = walker.enumerate(AssetCategory::Css)?;
//! # Ok(())
//! # }
//! ```

use crate::category::AssetCategory;
use crate::error::OptimizeError;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Lexical path normalization: drops `.` segments and resolves `..`
/// against preceding segments where possible.
///
/// Equivalent spellings like `./dist` and `dist` or `sub/../dist` and
/// `dist` normalize to the same value, so path comparisons never depend
/// on how the user spelled them.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Canonical form when the path exists, lexical normalization otherwise
pub fn resolve_path(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| normalize_path(path))
}

/// One file discovered by the walker, consumed once by the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTask {
    pub relative_path: PathBuf,
    pub category: AssetCategory,
}

/// Enumerates files under an input root, relative-path based
pub struct TreeWalker {
    root: PathBuf,
    skip: Option<PathBuf>,
}

impl TreeWalker {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            skip: None,
        }
    }

    /// Exclude a subtree from enumeration (the nested output root)
    pub fn skip_subtree(mut self, path: impl Into<PathBuf>) -> Self {
        self.skip = Some(path.into());
        self
    }

    /// Enumerate all files of one category, sorted by relative path
    pub fn enumerate(&self, category: AssetCategory) -> Result<Vec<FileTask>, OptimizeError> {
        let mut tasks: Vec<FileTask> = self
            .walk()?
            .into_iter()
            .filter(|path| AssetCategory::classify(path) == Some(category))
            .map(|relative_path| FileTask {
                relative_path,
                category,
            })
            .collect();
        tasks.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        Ok(tasks)
    }

    /// Enumerate every regular file regardless of category (backup copy)
    pub fn enumerate_all(&self) -> Result<Vec<PathBuf>, OptimizeError> {
        let mut files = self.walk()?;
        files.sort();
        Ok(files)
    }

    fn walk(&self) -> Result<Vec<PathBuf>, OptimizeError> {
        if !self.root.is_dir() {
            return Err(OptimizeError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Input directory does not exist: {}", self.root.display()),
            )));
        }

        // Resolve the excluded subtree relative to the resolved root, so
        // spellings like `./dist` vs `dist` cannot defeat the exclusion
        let skip_relative: Option<PathBuf> = self.skip.as_ref().and_then(|skip| {
            resolve_path(skip)
                .strip_prefix(resolve_path(&self.root))
                .ok()
                .map(Path::to_path_buf)
        });

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            if let Ok(relative) = entry.path().strip_prefix(&self.root) {
                if let Some(ref skip) = skip_relative {
                    if relative.starts_with(skip) {
                        continue;
                    }
                }
                files.push(relative.to_path_buf());
            }
        }
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn test_enumerate_filters_by_category_and_sorts() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "z/late.css");
        touch(temp.path(), "a/early.css");
        touch(temp.path(), "index.html");
        touch(temp.path(), "app.js");

        let walker = TreeWalker::new(temp.path());
        let tasks = walker.enumerate(AssetCategory::Css).unwrap();

        let paths: Vec<_> = tasks.iter().map(|t| t.relative_path.clone()).collect();
        assert_eq!(
            paths,
            vec![PathBuf::from("a/early.css"), PathBuf::from("z/late.css")]
        );
        assert!(tasks.iter().all(|t| t.category == AssetCategory::Css));
    }

    #[test]
    fn test_enumeration_is_stable_across_runs() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "b.js");
        touch(temp.path(), "a.js");
        touch(temp.path(), "sub/c.js");

        let walker = TreeWalker::new(temp.path());
        let first = walker.enumerate(AssetCategory::Js).unwrap();
        let second = walker.enumerate(AssetCategory::Js).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let walker = TreeWalker::new("/nonexistent/site");
        assert!(matches!(
            walker.enumerate(AssetCategory::Html),
            Err(OptimizeError::Io(_))
        ));
    }

    #[test]
    fn test_zero_matches_yields_empty_sequence() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "notes.txt");

        let walker = TreeWalker::new(temp.path());
        let tasks = walker.enumerate(AssetCategory::Image).unwrap();
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_skip_subtree_excludes_nested_output() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "index.html");
        touch(temp.path(), "dist/index.html");

        let walker = TreeWalker::new(temp.path()).skip_subtree(temp.path().join("dist"));
        let tasks = walker.enumerate(AssetCategory::Html).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].relative_path, PathBuf::from("index.html"));
    }

    #[test]
    fn test_normalize_path_drops_dot_segments() {
        assert_eq!(normalize_path(Path::new("./dist")), PathBuf::from("dist"));
        assert_eq!(normalize_path(Path::new("a/./b")), PathBuf::from("a/b"));
        assert_eq!(normalize_path(Path::new("a/../b")), PathBuf::from("b"));
        assert_eq!(normalize_path(Path::new("../b")), PathBuf::from("../b"));
    }

    #[test]
    fn test_skip_subtree_matches_equivalent_spellings() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "index.html");
        touch(temp.path(), "dist/index.html");
        fs::create_dir_all(temp.path().join("sub")).unwrap();

        // The exclusion holds even when the output root is spelled with
        // redundant path segments
        let walker =
            TreeWalker::new(temp.path()).skip_subtree(temp.path().join("sub/../dist"));
        let tasks = walker.enumerate(AssetCategory::Html).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].relative_path, PathBuf::from("index.html"));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directories_are_not_followed() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "style.css");

        // Directory outside the root, reachable only through a symlink
        let outside = TempDir::new().unwrap();
        touch(outside.path(), "external.css");
        std::os::unix::fs::symlink(outside.path(), temp.path().join("linked")).unwrap();

        // Cycle back to the root itself
        std::os::unix::fs::symlink(temp.path(), temp.path().join("loop")).unwrap();

        let walker = TreeWalker::new(temp.path());
        let tasks = walker.enumerate(AssetCategory::Css).unwrap();

        let paths: Vec<_> = tasks.iter().map(|t| t.relative_path.clone()).collect();
        assert_eq!(paths, vec![PathBuf::from("style.css")]);
    }

    #[test]
    fn test_enumerate_all_lists_every_file() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "index.html");
        touch(temp.path(), "sub/style.css");
        touch(temp.path(), "notes.txt");

        let walker = TreeWalker::new(temp.path());
        let files = walker.enumerate_all().unwrap();
        assert_eq!(files.len(), 3);
        assert!(files.contains(&PathBuf::from("notes.txt")));
    }
}
