//! # Asset Category Module
//!
//! Questo modulo classifica i file in base all'estensione.
//!
//! ## Responsabilità:
//! - Definisce `AssetCategory` (html/css/js/image)
//! - Mappa un path alla sua categoria (case-insensitive sull'estensione)
//! - Espone l'ordine fisso di processing: HTML, poi CSS, poi JS, poi immagini
//!
//! ## Formati supportati:
//! - **HTML**: html, htm
//! - **CSS**: css
//! - **JS**: js, mjs
//! - **Immagini**: png, jpg, jpeg, webp
//!
//! L'ordine di processing conta solo per il progress reporting: le categorie
//! scrivono insiemi di file disgiunti, quindi non ci sono conflitti.

use std::fmt;
use std::path::Path;

/// File category, determining which compression adapter applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetCategory {
    Html,
    Css,
    Js,
    Image,
}

impl AssetCategory {
    /// Fixed processing order: HTML, CSS, JS, images
    pub const ALL: [AssetCategory; 4] = [
        AssetCategory::Html,
        AssetCategory::Css,
        AssetCategory::Js,
        AssetCategory::Image,
    ];

    /// File extensions belonging to this category (lowercase)
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            AssetCategory::Html => &["html", "htm"],
            AssetCategory::Css => &["css"],
            AssetCategory::Js => &["js", "mjs"],
            AssetCategory::Image => &["png", "jpg", "jpeg", "webp"],
        }
    }

    /// Classify a path by its extension
    pub fn classify(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.extensions().contains(&ext.as_str()))
    }

    /// Human-readable label for reports
    pub fn label(self) -> &'static str {
        match self {
            AssetCategory::Html => "HTML",
            AssetCategory::Css => "CSS",
            AssetCategory::Js => "JS",
            AssetCategory::Image => "images",
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
