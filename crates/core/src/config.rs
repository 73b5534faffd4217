//! Configuration file parsing for .prgraph.toml

use crate::languages::{Language, LanguageRegistry};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = ".prgraph.toml";

/// Main configuration structure for .prgraph.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrGraphConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub closure: ClosureConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Languages to analyze (all bundled grammars if empty)
    #[serde(default)]
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosureConfig {
    /// Parallel parse workers per generation (0 = one per logical CPU)
    #[serde(default)]
    pub parallelism: usize,

    /// Use sequential anonymous-name salts instead of random ones, making
    /// graph output reproducible run to run
    #[serde(default)]
    pub deterministic_names: bool,

    /// Files larger than this are skipped (generated bundles, vendored blobs)
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
}

impl Default for ClosureConfig {
    fn default() -> Self {
        Self {
            parallelism: 0,
            deterministic_names: false,
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

fn default_max_file_bytes() -> u64 {
    2 * 1024 * 1024
}

impl PrGraphConfig {
    /// Load configuration from a specific file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: PrGraphConfig = toml::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Load `.prgraph.toml` from the repo root, or defaults when absent
    pub fn load_or_default(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// The language registry this config selects.
    ///
    /// Unknown language names are ignored rather than fatal; an empty or
    /// fully-unknown list falls back to the full registry.
    pub fn registry(&self) -> LanguageRegistry {
        let selected: Vec<Language> = self
            .general
            .languages
            .iter()
            .filter_map(|name| Language::from_name(name))
            .collect();
        if selected.is_empty() {
            LanguageRegistry::full()
        } else {
            LanguageRegistry::with_languages(selected)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PrGraphConfig::default();
        assert!(config.general.languages.is_empty());
        assert_eq!(config.closure.parallelism, 0);
        assert!(!config.closure.deterministic_names);
        assert_eq!(config.closure.max_file_bytes, 2 * 1024 * 1024);
        assert_eq!(config.registry().languages().len(), 8);
    }

    #[test]
    fn test_parse_partial_config() {
        let config: PrGraphConfig = toml::from_str(
            r#"
[general]
languages = ["python", "typescript"]

[closure]
parallelism = 4
deterministic_names = true
"#,
        )
        .unwrap();
        assert_eq!(config.closure.parallelism, 4);
        assert!(config.closure.deterministic_names);
        assert_eq!(config.registry().languages().len(), 2);
        // Unset keys keep their defaults
        assert_eq!(config.closure.max_file_bytes, 2 * 1024 * 1024);
    }

    #[test]
    fn test_unknown_language_names_ignored() {
        let config: PrGraphConfig = toml::from_str(
            r#"
[general]
languages = ["python", "cobol"]
"#,
        )
        .unwrap();
        assert_eq!(
            config.registry().languages(),
            &[Language::Python]
        );
    }
}
