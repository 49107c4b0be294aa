//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Decade faceting behavior
    #[serde(default)]
    pub facets: FacetConfig,

    /// Candidate link selection and ranking
    #[serde(default)]
    pub links: LinkConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        let scheme = self.links.identifier_scheme.trim();
        if scheme.is_empty() {
            return Err(AppError::validation("links.identifier_scheme is empty"));
        }
        if scheme.contains(':') {
            return Err(AppError::validation(
                "links.identifier_scheme must not contain ':'",
            ));
        }
        if let Some(ext) = self
            .links
            .excluded_extensions
            .iter()
            .find(|ext| !ext.starts_with('.'))
        {
            return Err(AppError::validation(format!(
                "links.excluded_extensions entry '{ext}' must start with '.'"
            )));
        }
        Ok(())
    }
}

/// Decade faceting settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FacetConfig {
    /// Drop years later than the current calendar year before faceting
    #[serde(default)]
    pub filter_future: bool,
}

/// Candidate link settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Path extensions marking an identifier URL as an image, not a landing page
    #[serde(default = "defaults::excluded_extensions")]
    pub excluded_extensions: Vec<String>,

    /// Scheme of namespaced record identifiers (`scheme:authority:local`)
    #[serde(default = "defaults::identifier_scheme")]
    pub identifier_scheme: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            excluded_extensions: defaults::excluded_extensions(),
            identifier_scheme: defaults::identifier_scheme(),
        }
    }
}

impl LinkConfig {
    /// Whether a lowercased path extension (with leading dot) is excluded.
    pub fn is_excluded(&self, extension: &str) -> bool {
        self.excluded_extensions
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}

mod defaults {
    pub fn excluded_extensions() -> Vec<String> {
        vec![
            ".jpg".into(),
            ".jpeg".into(),
            ".png".into(),
            ".tif".into(),
            ".tiff".into(),
        ]
    }
    pub fn identifier_scheme() -> String {
        "oai".into()
    }
}
