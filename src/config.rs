//! # Configuration Management Module
//!
//! Questo modulo gestisce tutta la configurazione dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce la struct `Config` con tutti i parametri di ottimizzazione
//! - Deep-merge delle opzioni utente sopra i default documentati
//! - Supporta caricamento/salvataggio configurazione da/verso file JSON
//! - Fornisce validazione robusta dei parametri di input
//!
//! ## Formato file di configurazione (camelCase):
//! ```json
//! {
//!   "inputDir": "./",
//!   "outputDir": "./dist",
//!   "html": { "enabled": true, "keepComments": false },
//!   "css": { "enabled": true, "level": 1 },
//!   "js": true,
//!   "images": { "enabled": true, "quality": 80, "generateWebp": false },
//!   "backup": false,
//!   "verbose": false
//! }
//! ```
//!
//! Ogni categoria è un bool (on/off) oppure un oggetto con `enabled` più
//! settings opachi passati così come sono all'adapter corrispondente.
//!
//! ## Strategia di merge:
//! - Oggetti annidati: merge ricorsivo chiave per chiave
//! - Primitivi e array: il valore utente sostituisce il default
//! - Chiavi sconosciute: passano intatte (forward-compatible, nessuno
//!   schema rigido)
//!
//! ## Validazione:
//! - `images.quality` e `images.webpQuality`: 1-100
//! - `images.pngPreset`: 0-6
//! - `css.level`: 0-3
//! - `inputDir` deve essere diversa da `outputDir`

use crate::category::AssetCategory;
use crate::error::OptimizeError;
use crate::walker::resolve_path;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Configuration for one asset optimization run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Directory containing the site sources
    pub input_dir: PathBuf,
    /// Directory receiving the mirrored optimized tree
    pub output_dir: PathBuf,
    /// HTML category toggle/settings
    pub html: CategoryToggle,
    /// CSS category toggle/settings
    pub css: CategoryToggle,
    /// JS category toggle/settings
    pub js: CategoryToggle,
    /// Image category toggle/settings
    pub images: CategoryToggle,
    /// Copy the whole input tree under outputDir/backup before optimizing
    pub backup: bool,
    /// Verbose logging
    pub verbose: bool,
    /// Unknown keys are carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("./"),
            output_dir: PathBuf::from("./dist"),
            html: CategoryToggle::default(),
            css: CategoryToggle::default(),
            js: CategoryToggle::default(),
            images: CategoryToggle::default(),
            backup: false,
            verbose: false,
            extra: Map::new(),
        }
    }
}

/// A category entry: plain on/off flag or detailed settings object
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryToggle {
    Flag(bool),
    Detailed(CategorySettings),
}

impl Default for CategoryToggle {
    fn default() -> Self {
        CategoryToggle::Flag(true)
    }
}

impl CategoryToggle {
    /// Whether the category participates in the run
    pub fn enabled(&self) -> bool {
        match self {
            CategoryToggle::Flag(flag) => *flag,
            CategoryToggle::Detailed(settings) => settings.enabled,
        }
    }

    /// Normalized settings view (a bare flag has no compressor options)
    pub fn settings(&self) -> CategorySettings {
        match self {
            CategoryToggle::Flag(flag) => CategorySettings {
                enabled: *flag,
                options: Map::new(),
            },
            CategoryToggle::Detailed(settings) => settings.clone(),
        }
    }
}

/// Detailed per-category settings: `enabled` plus opaque compressor options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySettings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Compressor-specific settings, passed through opaquely to the adapter
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

fn default_enabled() -> bool {
    true
}

impl Default for CategorySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            options: Map::new(),
        }
    }
}

impl CategorySettings {
    /// Read a boolean option, falling back to a default
    pub fn bool_option(&self, key: &str, default: bool) -> bool {
        self.options
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(default)
    }

    /// Read a small numeric option, falling back to a default
    pub fn u8_option(&self, key: &str, default: u8) -> u8 {
        self.options
            .get(key)
            .and_then(Value::as_u64)
            .map(|value| value as u8)
            .unwrap_or(default)
    }
}

impl Config {
    /// Deep-merge user-supplied JSON over the documented defaults.
    ///
    /// Nested objects merge recursively; primitives and arrays replace.
    pub fn merge_over_defaults(user: Value) -> Result<Self, OptimizeError> {
        let mut base = serde_json::to_value(Config::default())?;
        deep_merge(&mut base, user);
        serde_json::from_value(base)
            .map_err(|e| OptimizeError::Config(format!("Invalid configuration: {}", e)))
    }

    /// Load configuration from a JSON file, merged over defaults
    pub async fn from_file(path: &Path) -> Result<Self, OptimizeError> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            OptimizeError::Config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        let user: Value = serde_json::from_str(&content).map_err(|e| {
            OptimizeError::Config(format!("Malformed config file {}: {}", path.display(), e))
        })?;
        let config = Self::merge_over_defaults(user)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file (used by the `init` subcommand)
    pub async fn save_to_file(&self, path: &Path) -> Result<(), OptimizeError> {
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }

    /// Toggle/settings entry for a category
    pub fn category_toggle(&self, category: AssetCategory) -> &CategoryToggle {
        match category {
            AssetCategory::Html => &self.html,
            AssetCategory::Css => &self.css,
            AssetCategory::Js => &self.js,
            AssetCategory::Image => &self.images,
        }
    }

    /// Whether a category is enabled for this run
    pub fn category_enabled(&self, category: AssetCategory) -> bool {
        self.category_toggle(category).enabled()
    }

    /// Normalized settings for a category
    pub fn category_settings(&self, category: AssetCategory) -> CategorySettings {
        self.category_toggle(category).settings()
    }

    /// Validate configuration parameters.
    ///
    /// Input and output are compared after path resolution, so spellings
    /// like `site` and `./site` count as the same directory.
    pub fn validate(&self) -> Result<(), OptimizeError> {
        if resolve_path(&self.input_dir) == resolve_path(&self.output_dir) {
            return Err(OptimizeError::Config(
                "Input and output directories must differ".to_string(),
            ));
        }

        let images = self.category_settings(AssetCategory::Image);
        for key in ["quality", "webpQuality"] {
            if let Some(value) = images.options.get(key).and_then(Value::as_u64) {
                if value == 0 || value > 100 {
                    return Err(OptimizeError::Config(format!(
                        "images.{} must be between 1 and 100",
                        key
                    )));
                }
            }
        }
        if let Some(preset) = images.options.get("pngPreset").and_then(Value::as_u64) {
            if preset > 6 {
                return Err(OptimizeError::Config(
                    "images.pngPreset must be between 0 and 6".to_string(),
                ));
            }
        }

        let css = self.category_settings(AssetCategory::Css);
        if let Some(level) = css.options.get("level").and_then(Value::as_u64) {
            if level > 3 {
                return Err(OptimizeError::Config(
                    "css.level must be between 0 and 3".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Recursive JSON merge: objects merge key by key, everything else replaces
fn deep_merge(base: &mut Value, user: Value) {
    match (base, user) {
        (Value::Object(base_map), Value::Object(user_map)) => {
            for (key, user_value) in user_map {
                match base_map.get_mut(&key) {
                    Some(base_value) => deep_merge(base_value, user_value),
                    None => {
                        base_map.insert(key, user_value);
                    }
                }
            }
        }
        (base_slot, user_value) => *base_slot = user_value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.input_dir, PathBuf::from("./"));
        assert_eq!(config.output_dir, PathBuf::from("./dist"));
        for category in AssetCategory::ALL {
            assert!(config.category_enabled(category));
        }
        assert!(!config.backup);
        assert!(!config.verbose);
    }

    #[test]
    fn test_merge_nested_category_settings() {
        let config = Config::merge_over_defaults(json!({ "css": { "level": 1 } })).unwrap();

        let css = config.category_settings(AssetCategory::Css);
        assert!(css.enabled);
        assert_eq!(css.options.get("level"), Some(&json!(1)));

        // Everything else stays at its documented default
        assert_eq!(config.input_dir, PathBuf::from("./"));
        assert_eq!(config.output_dir, PathBuf::from("./dist"));
        assert!(config.category_enabled(AssetCategory::Html));
        assert!(!config.backup);
    }

    #[test]
    fn test_merge_boolean_toggle_disables_category() {
        let config = Config::merge_over_defaults(json!({ "js": false })).unwrap();
        assert!(!config.category_enabled(AssetCategory::Js));
        assert!(config.category_enabled(AssetCategory::Css));
    }

    #[test]
    fn test_merge_replaces_primitive_fields() {
        let config = Config::merge_over_defaults(json!({
            "inputDir": "site",
            "outputDir": "out",
            "backup": true
        }))
        .unwrap();
        assert_eq!(config.input_dir, PathBuf::from("site"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert!(config.backup);
    }

    #[test]
    fn test_unknown_keys_pass_through() {
        let config =
            Config::merge_over_defaults(json!({ "futureOption": { "nested": [1, 2] } })).unwrap();
        assert_eq!(
            config.extra.get("futureOption"),
            Some(&json!({ "nested": [1, 2] }))
        );

        // And they survive re-serialization
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["futureOption"], json!({ "nested": [1, 2] }));
    }

    #[test]
    fn test_serialized_keys_are_camel_case() {
        let value = serde_json::to_value(Config::default()).unwrap();
        assert!(value.get("inputDir").is_some());
        assert!(value.get("outputDir").is_some());
        assert!(value.get("images").is_some());
    }

    #[test]
    fn test_validate_rejects_out_of_range_values() {
        let config = Config::merge_over_defaults(json!({ "images": { "quality": 0 } })).unwrap();
        assert!(config.validate().is_err());

        let config = Config::merge_over_defaults(json!({ "images": { "quality": 101 } })).unwrap();
        assert!(config.validate().is_err());

        let config = Config::merge_over_defaults(json!({ "css": { "level": 4 } })).unwrap();
        assert!(config.validate().is_err());

        let config = Config::merge_over_defaults(json!({ "outputDir": "./" })).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_equivalent_input_output_spellings() {
        let config = Config::merge_over_defaults(json!({
            "inputDir": "site",
            "outputDir": "./site"
        }))
        .unwrap();
        assert!(config.validate().is_err());

        let config = Config::merge_over_defaults(json!({
            "inputDir": "site",
            "outputDir": "nested/../site"
        }))
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_detailed_settings_accessors() {
        let config = Config::merge_over_defaults(json!({
            "images": { "quality": 92, "generateWebp": true }
        }))
        .unwrap();
        let images = config.category_settings(AssetCategory::Image);
        assert_eq!(images.u8_option("quality", 80), 92);
        assert!(images.bool_option("generateWebp", false));
        assert_eq!(images.u8_option("pngPreset", 2), 2);
    }

    #[tokio::test]
    async fn test_config_save_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("optimizer.config.json");

        let mut original = Config::default();
        original.input_dir = PathBuf::from("site");
        original.backup = true;
        original.save_to_file(&config_path).await.unwrap();

        let loaded = Config::from_file(&config_path).await.unwrap();
        assert_eq!(loaded.input_dir, PathBuf::from("site"));
        assert!(loaded.backup);
        assert!(loaded.category_enabled(AssetCategory::Html));
    }

    #[tokio::test]
    async fn test_missing_config_file_is_an_error() {
        let result = Config::from_file(Path::new("/nonexistent/config.json")).await;
        assert!(matches!(result, Err(OptimizeError::Config(_))));
    }
}
