//! Configuration: where the catalogs live.
//!
//! ```toml
//! catalog_dir = "/usr/share/hoverscope"
//!
//! [files]
//! instruments = "telescopes.json"
//! models = "sams.json"
//! ```
//!
//! Lookup order for [`HoverscopeConfig::load`]:
//!
//! 1. an explicit path (must exist)
//! 2. `<config dir>/hoverscope/config.toml`, if present
//! 3. built-in defaults
//!
//! `HOVERSCOPE_CATALOG_DIR` then overrides `catalog_dir`.

use crate::source::{CatalogFiles, DirectorySource};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding [`HoverscopeConfig::catalog_dir`].
pub const CATALOG_DIR_ENV: &str = "HOVERSCOPE_CATALOG_DIR";

const APP_DIR: &str = "hoverscope";
const CONFIG_FILE: &str = "config.toml";

/// Settings for locating catalogs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverscopeConfig {
    /// Directory holding the catalog files.
    pub catalog_dir: PathBuf,
    /// Per-category file names.
    pub files: CatalogFiles,
}

impl Default for HoverscopeConfig {
    fn default() -> Self {
        Self {
            catalog_dir: default_catalog_dir(),
            files: CatalogFiles::default(),
        }
    }
}

/// `<data dir>/hoverscope`, or `./catalogs` where the platform has none.
fn default_catalog_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("catalogs"))
}

impl HoverscopeConfig {
    /// Per-user config file location, if the platform has a config dir.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Parse TOML text. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] on invalid TOML or wrongly typed keys.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::config(format!("Invalid config: {e}")))
    }

    /// Read a config file.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read {}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Resolve the effective config, then apply the environment override.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if `explicit` is given and unreadable, or if any
    /// config file found is invalid.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => {
                log::debug!("[config] Using {}", path.display());
                Self::from_path(path)?
            }
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => {
                    log::debug!("[config] Using {}", path.display());
                    Self::from_path(path)?
                }
                None => {
                    log::debug!("[config] No config file, using defaults");
                    Self::default()
                }
            },
        };
        Ok(config.with_env_override(std::env::var_os(CATALOG_DIR_ENV)))
    }

    /// Replace `catalog_dir` with a non-empty override value.
    #[must_use]
    pub fn with_env_override(mut self, value: Option<OsString>) -> Self {
        if let Some(dir) = value.filter(|v| !v.is_empty()) {
            log::debug!("[config] {CATALOG_DIR_ENV} overrides catalog_dir");
            self.catalog_dir = PathBuf::from(dir);
        }
        self
    }

    /// Serialize back to TOML.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if a path is not valid UTF-8.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(format!("Failed to serialize config: {e}")))
    }

    /// Catalog source for this config.
    #[must_use]
    pub fn source(&self) -> DirectorySource {
        DirectorySource::with_files(&self.catalog_dir, self.files.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::CatalogSource;
    use hoverscope_core::Category;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = HoverscopeConfig::from_toml_str(
            r#"
            catalog_dir = "/srv/catalogs"

            [files]
            models = "models.json"
            "#,
        )
        .unwrap();
        assert_eq!(config.catalog_dir, PathBuf::from("/srv/catalogs"));
        assert_eq!(config.files.models, "models.json");
        assert_eq!(config.files.instruments, "telescopes.json");
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let config = HoverscopeConfig::from_toml_str("").unwrap();
        assert_eq!(config, HoverscopeConfig::default());
    }

    #[test]
    fn wrong_types_are_config_errors() {
        let err = HoverscopeConfig::from_toml_str("catalog_dir = 3").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = HoverscopeConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn explicit_path_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[files]\npersons = \"people.json\"\n").unwrap();
        let config = HoverscopeConfig::from_path(&path).unwrap();
        assert_eq!(config.files.persons, "people.json");
    }

    #[test]
    fn env_override_replaces_catalog_dir() {
        let config = HoverscopeConfig::default().with_env_override(Some("/tmp/cats".into()));
        assert_eq!(config.catalog_dir, PathBuf::from("/tmp/cats"));

        let untouched = HoverscopeConfig::default().with_env_override(Some(OsString::new()));
        assert_eq!(untouched.catalog_dir, HoverscopeConfig::default().catalog_dir);
    }

    #[test]
    fn toml_round_trips_through_show() {
        let config = HoverscopeConfig {
            catalog_dir: PathBuf::from("/data"),
            files: CatalogFiles::default(),
        };
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("catalog_dir = \"/data\""));
        assert_eq!(HoverscopeConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn source_uses_configured_files() {
        let config = HoverscopeConfig::from_toml_str(
            "catalog_dir = \"/srv\"\n[files]\nsurveys = \"s.json\"\n",
        )
        .unwrap();
        let source = config.source();
        assert_eq!(source.path_for(Category::Survey), PathBuf::from("/srv/s.json"));
        assert_eq!(source.name(), "dir:/srv");
    }
}
