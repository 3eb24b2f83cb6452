//! Adapter HTML: delega la minificazione a `minify-html`.
//!
//! Settings riconosciuti: `keepComments` (default false),
//! `minifyInlineCss` (default true), `minifyInlineJs` (default false).

use super::CompressionAdapter;
use crate::config::CategorySettings;
use crate::error::OptimizeError;
use crate::walker::FileTask;
use minify_html::{minify, Cfg};

pub struct HtmlAdapter {
    cfg: Cfg,
}

impl HtmlAdapter {
    pub fn new(settings: &CategorySettings) -> Self {
        let mut cfg = Cfg::new();
        cfg.keep_comments = settings.bool_option("keepComments", false);
        cfg.minify_css = settings.bool_option("minifyInlineCss", true);
        cfg.minify_js = settings.bool_option("minifyInlineJs", false);
        Self { cfg }
    }
}

impl CompressionAdapter for HtmlAdapter {
    fn transform(&self, _task: &FileTask, input: &[u8]) -> Result<Vec<u8>, OptimizeError> {
        Ok(minify(input, &self.cfg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::AssetCategory;
    use std::path::PathBuf;

    fn task() -> FileTask {
        FileTask {
            relative_path: PathBuf::from("index.html"),
            category: AssetCategory::Html,
        }
    }

    #[test]
    fn test_minifies_whitespace_and_comments() {
        let adapter = HtmlAdapter::new(&CategorySettings::default());
        let input = b"<html>  <body>\n  <!-- comment -->  <p>hi</p>\n  </body>  </html>";

        let output = adapter.transform(&task(), input).unwrap();
        assert!(output.len() < input.len());
        let text = String::from_utf8(output).unwrap();
        assert!(!text.contains("comment"));
        assert!(text.contains("<p>hi</p>"));
    }

    #[test]
    fn test_keep_comments_setting() {
        let settings = CategorySettings {
            enabled: true,
            options: serde_json::json!({ "keepComments": true })
                .as_object()
                .unwrap()
                .clone(),
        };
        let adapter = HtmlAdapter::new(&settings);
        let input = b"<p>hi</p><!-- keep me -->";

        let output = adapter.transform(&task(), input).unwrap();
        assert!(String::from_utf8(output).unwrap().contains("keep me"));
    }

    #[test]
    fn test_deterministic() {
        let adapter = HtmlAdapter::new(&CategorySettings::default());
        let input = b"<div>   <span>x</span>   </div>";
        let first = adapter.transform(&task(), input).unwrap();
        let second = adapter.transform(&task(), input).unwrap();
        assert_eq!(first, second);
    }
}
