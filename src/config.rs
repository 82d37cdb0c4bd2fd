//! Exporter configuration.
//!
//! Loaded from `formbook.toml`. All fields have defaults, so the file is
//! optional and sparse — override just the values you want:
//!
//! ```toml
//! # Root directory for generated artifacts
//! output_root = "output"
//!
//! # Locales to export; "cy" adds a Welsh artifact per round
//! locales = ["en", "cy"]
//!
//! # Append the component type tag ("[TextField]") to question titles
//! show_field_types = false
//!
//! # Page size for listing views
//! rows_per_page = 20
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::types::Locale;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Stock `formbook.toml` with all options documented, for `gen-config`.
pub const STOCK_CONFIG: &str = r#"# formbook configuration
# All options are optional - defaults shown below.

# Root directory for generated artifacts. Each round exports to
# <output_root>/<round_short_name>/html/.
output_root = "output"

# Locales to export. English is always sensible; add "cy" to also write a
# Welsh artifact rendered from the parallel Welsh fields (falling back to
# English where a translation is missing).
locales = ["en"]

# Append the component type tag to question titles, e.g.
# "What is your organisation's name? [TextField]". Useful for internal
# review copies, off for public exports.
show_field_types = false

# Rows per page for listing views.
rows_per_page = 20
"#;

/// Exporter settings loaded from `formbook.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Root directory for generated artifacts.
    pub output_root: PathBuf,
    /// Locales to export, in output order.
    pub locales: Vec<Locale>,
    /// Append `[Type]` tags to component titles.
    pub show_field_types: bool,
    /// Page size for listing views.
    pub rows_per_page: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from("output"),
            locales: vec![Locale::En],
            show_field_types: false,
            rows_per_page: crate::pager::DEFAULT_ROWS_PER_PAGE,
        }
    }
}

impl ExportConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: ExportConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.locales.is_empty() {
            return Err(ConfigError::Validation(
                "locales must not be empty".to_string(),
            ));
        }
        if self.rows_per_page == 0 {
            return Err(ConfigError::Validation(
                "rows_per_page must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
