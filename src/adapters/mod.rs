//! # Compression Adapters Module
//!
//! Questo modulo definisce il contratto black-box verso i minifier esterni
//! e gli adapter concreti per ogni categoria.
//!
//! ## Contratto:
//! - `transform(input, config) -> output` oppure errore: la pipeline non
//!   dipende mai dal comportamento interno dei compressori
//! - `derivative` produce l'eventuale output secondario (WebP) con lo
//!   stesso base name ed estensione alternativa; è best-effort
//!
//! ## Adapter concreti:
//! - `HtmlAdapter`: delega a `minify-html`
//! - `CssAdapter`: delega a `css-minify`
//! - `JsAdapter`: delega a `minify-js`
//! - `ImageAdapter`: delega a `image`, `oxipng` e `webp`
//!
//! Ogni adapter viene costruito con i settings opachi della sua categoria;
//! le chiavi che non riconosce vengono ignorate.

mod css;
mod html;
mod image;
mod js;

pub use self::css::CssAdapter;
pub use self::html::HtmlAdapter;
pub use self::image::ImageAdapter;
pub use self::js::JsAdapter;

use crate::category::AssetCategory;
use crate::config::Config;
use crate::error::OptimizeError;
use crate::walker::FileTask;
use std::collections::HashMap;
use std::path::PathBuf;

/// Black-box transform from raw content to reduced content
pub trait CompressionAdapter {
    fn transform(&self, task: &FileTask, input: &[u8]) -> Result<Vec<u8>, OptimizeError>;

    /// Optional secondary output: mirrored relative path plus its content.
    ///
    /// Failures here never fail the primary file; the pipeline logs and
    /// moves on.
    fn derivative(
        &self,
        _task: &FileTask,
        _input: &[u8],
    ) -> Option<(PathBuf, Result<Vec<u8>, OptimizeError>)> {
        None
    }
}

/// One adapter per category; tests can substitute mocks
pub struct AdapterSet {
    adapters: HashMap<AssetCategory, Box<dyn CompressionAdapter>>,
}

impl AdapterSet {
    /// Build the production adapters from per-category settings
    pub fn from_config(config: &Config) -> Self {
        let mut set = Self {
            adapters: HashMap::new(),
        };
        set.insert(
            AssetCategory::Html,
            Box::new(HtmlAdapter::new(&config.category_settings(AssetCategory::Html))),
        );
        set.insert(
            AssetCategory::Css,
            Box::new(CssAdapter::new(&config.category_settings(AssetCategory::Css))),
        );
        set.insert(
            AssetCategory::Js,
            Box::new(JsAdapter::new(&config.category_settings(AssetCategory::Js))),
        );
        set.insert(
            AssetCategory::Image,
            Box::new(ImageAdapter::new(&config.category_settings(AssetCategory::Image))),
        );
        set
    }

    /// Replace the adapter for one category
    pub fn insert(&mut self, category: AssetCategory, adapter: Box<dyn CompressionAdapter>) {
        self.adapters.insert(category, adapter);
    }

    pub fn get(&self, category: AssetCategory) -> &dyn CompressionAdapter {
        self.adapters
            .get(&category)
            .expect("adapter registered for every category")
            .as_ref()
    }
}
