//! Optional loader configuration stored in `config.toml` next to `ids.sav`.
//!
//! Players never need this file. It exists for setups the automatic
//! detection cannot handle, such as a game copy outside `steamapps`.
//!
//! ```toml
//! workshop_dir = "D:/SteamLibrary/steamapps/workshop/content/252950"
//! allow_non_steam = true
//! sorted_scan = true
//! ```

use crate::error::Result;
use bswl_core::CandidateOrder;
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use std::fs;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Use this workshop folder instead of deriving it from the game path.
    pub workshop_dir: Option<Utf8PathBuf>,
    /// Load even when the host reports a non-Steam game version.
    pub allow_non_steam: bool,
    /// Sort folder entries by name before picking maps and previews.
    pub sorted_scan: bool,
}

impl LoaderConfig {
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load the config, falling back to defaults if the file is missing or
    /// cannot be parsed.
    pub fn load(path: &Utf8Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded loader config from {}", path);
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}. Using defaults.", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {}. Using defaults.", path, e);
                Self::default()
            }
        }
    }

    pub fn candidate_order(&self) -> CandidateOrder {
        if self.sorted_scan {
            CandidateOrder::Sorted
        } else {
            CandidateOrder::Filesystem
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full() {
        let config = LoaderConfig::parse(
            r#"
            workshop_dir = "/games/workshop/252950"
            allow_non_steam = true
            sorted_scan = true
            "#,
        )
        .unwrap();

        assert_eq!(
            config.workshop_dir,
            Some(Utf8PathBuf::from("/games/workshop/252950"))
        );
        assert!(config.allow_non_steam);
        assert_eq!(config.candidate_order(), CandidateOrder::Sorted);
    }

    #[test]
    fn test_parse_empty_is_default() {
        let config = LoaderConfig::parse("").unwrap();
        assert_eq!(config, LoaderConfig::default());
        assert_eq!(config.candidate_order(), CandidateOrder::Filesystem);
    }

    #[test]
    fn test_load_missing_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = Utf8Path::from_path(temp.path()).unwrap().join("config.toml");
        assert_eq!(LoaderConfig::load(&path), LoaderConfig::default());
    }

    #[test]
    fn test_load_malformed_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = Utf8Path::from_path(temp.path()).unwrap().join("config.toml");
        fs::write(&path, "sorted_scan = \"maybe\"").unwrap();

        assert!(LoaderConfig::parse("sorted_scan = \"maybe\"").is_err());
        assert_eq!(LoaderConfig::load(&path), LoaderConfig::default());
    }
}
