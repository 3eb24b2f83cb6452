//! # Analysis Module
//!
//! Questo modulo implementa il subcommand `analyze`: ispezione read-only
//! dell'albero di input.
//!
//! ## Responsabilità:
//! - Enumera e misura i file per categoria senza invocare alcun compressore
//! - Non crea mai la directory di output e non scrive nulla
//! - Supporta una modalità verbose con il listing dei singoli file
//!
//! ## Esempio di report:
//! ```text
//! HTML: 12 files, 340.12 KB
//! CSS: 4 files, 88.90 KB
//! JS: 3 files, 8.79 KB
//! images: 51 files, 12.40 MB
//! Total: 70 files, 12.82 MB
//! ```

use crate::category::AssetCategory;
use crate::config::Config;
use crate::error::OptimizeError;
use crate::stats::format_size;
use crate::walker::TreeWalker;
use std::path::PathBuf;
use tracing::info;

/// Size entry for one discovered file
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub relative_path: PathBuf,
    pub size: u64,
}

/// Discovered files and sizes for one category
#[derive(Debug)]
pub struct CategoryAnalysis {
    pub category: AssetCategory,
    pub files: Vec<FileEntry>,
}

impl CategoryAnalysis {
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|entry| entry.size).sum()
    }
}

/// Full read-only report over the enabled categories
#[derive(Debug)]
pub struct AnalysisReport {
    pub categories: Vec<CategoryAnalysis>,
}

impl AnalysisReport {
    pub fn total_files(&self) -> usize {
        self.categories.iter().map(|c| c.files.len()).sum()
    }

    pub fn total_bytes(&self) -> u64 {
        self.categories.iter().map(|c| c.total_bytes()).sum()
    }

    /// Per-category analysis, if the category was enabled
    pub fn category(&self, category: AssetCategory) -> Option<&CategoryAnalysis> {
        self.categories.iter().find(|c| c.category == category)
    }

    /// Log the report; verbose mode lists every file
    pub fn log(&self, verbose: bool) {
        for analysis in &self.categories {
            info!(
                "{}: {} files, {}",
                analysis.category,
                analysis.files.len(),
                format_size(analysis.total_bytes())
            );
            if verbose {
                for entry in &analysis.files {
                    info!(
                        "  {} ({})",
                        entry.relative_path.display(),
                        format_size(entry.size)
                    );
                }
            }
        }
        info!(
            "Total: {} files, {}",
            self.total_files(),
            format_size(self.total_bytes())
        );
    }
}

/// Enumerate and size files per enabled category, writing nothing
pub async fn analyze_tree(config: &Config) -> Result<AnalysisReport, OptimizeError> {
    let walker = TreeWalker::new(&config.input_dir).skip_subtree(&config.output_dir);
    let mut categories = Vec::new();

    for category in AssetCategory::ALL {
        if !config.category_enabled(category) {
            continue;
        }
        let tasks = walker.enumerate(category)?;
        let mut files = Vec::with_capacity(tasks.len());
        for task in tasks {
            let metadata = tokio::fs::metadata(config.input_dir.join(&task.relative_path)).await?;
            files.push(FileEntry {
                relative_path: task.relative_path,
                size: metadata.len(),
            });
        }
        categories.push(CategoryAnalysis { category, files });
    }

    Ok(AnalysisReport { categories })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_file(root: &Path, relative: &str, size: usize) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, vec![b'j'; size]).unwrap();
    }

    #[tokio::test]
    async fn test_sizes_js_files_without_writing_output() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.input_dir = temp.path().join("site");
        config.output_dir = temp.path().join("dist");
        fs::create_dir_all(&config.input_dir).unwrap();
        write_file(&config.input_dir, "a.js", 4000);
        write_file(&config.input_dir, "sub/b.js", 3000);
        write_file(&config.input_dir, "sub/deep/c.js", 2000);

        let report = analyze_tree(&config).await.unwrap();

        let js = report.category(AssetCategory::Js).unwrap();
        assert_eq!(js.files.len(), 3);
        assert_eq!(js.total_bytes(), 9000);

        // Read-only: the output directory must not have been created
        assert!(!config.output_dir.exists());
    }

    #[tokio::test]
    async fn test_disabled_categories_are_not_reported() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.input_dir = temp.path().to_path_buf();
        config.output_dir = temp.path().join("dist");
        config.images = crate::config::CategoryToggle::Flag(false);
        write_file(temp.path(), "logo.png", 100);
        write_file(temp.path(), "index.html", 50);

        let report = analyze_tree(&config).await.unwrap();
        assert!(report.category(AssetCategory::Image).is_none());
        assert_eq!(report.total_files(), 1);
        assert_eq!(report.total_bytes(), 50);
    }
}
