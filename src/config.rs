use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::notice::Locale;

pub const DEFAULT_ENDPOINT: &str = "/configure";
pub const DEFAULT_INSTALL_PREFIX: &str = "stremio://install/";

/// Form settings. Every field has a default, so an empty file is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Path of the configure endpoint, resolved against the server/page origin.
    pub endpoint: String,
    /// Prepended to the addon URL to build the installer link.
    pub install_prefix: String,
    pub locale: Locale,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self { endpoint: DEFAULT_ENDPOINT.to_string(), install_prefix: DEFAULT_INSTALL_PREFIX.to_string(), locale: Locale::default() }
    }
}

impl FormConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> { toml::from_str(s).context("invalid form config") }

    /// Read a TOML config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() { return Ok(Self::default()); }
        let text = std::fs::read_to_string(path).with_context(|| format!("failed to read config: {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Apply `VEEZIE_ENDPOINT`, `VEEZIE_INSTALL_PREFIX` and `VEEZIE_LOCALE`.
    pub fn with_env_overrides(self) -> Self { self.with_overrides_from(|k| std::env::var(k).ok()) }

    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup("VEEZIE_ENDPOINT") { self.endpoint = v; }
        if let Some(v) = lookup("VEEZIE_INSTALL_PREFIX") { self.install_prefix = v; }
        if let Some(v) = lookup("VEEZIE_LOCALE") {
            match v.parse() {
                Ok(locale) => self.locale = locale,
                Err(e) => warn!("ignoring VEEZIE_LOCALE: {}", e),
            }
        }
        self
    }

    /// Installer link for an addon URL. The URL is appended as-is.
    pub fn install_link(&self, addon_url: &str) -> String { format!("{}{}", self.install_prefix, addon_url) }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_all_defaults() {
        assert_eq!(FormConfig::from_toml_str("").unwrap(), FormConfig::default());
    }

    #[test]
    fn load_reads_file_and_tolerates_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope.toml");
        assert_eq!(FormConfig::load(&missing).unwrap(), FormConfig::default());

        let path = tmp.path().join("veezie.toml");
        std::fs::write(&path, "endpoint = \"/api/configure\"\nlocale = \"en\"\n").unwrap();
        let cfg = FormConfig::load(&path).unwrap();
        assert_eq!(cfg.endpoint, "/api/configure");
        assert_eq!(cfg.locale, Locale::En);
        assert_eq!(cfg.install_prefix, DEFAULT_INSTALL_PREFIX);
    }

    #[test]
    fn bad_toml_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("veezie.toml");
        std::fs::write(&path, "locale = \"fr\"").unwrap();
        assert!(FormConfig::load(&path).is_err());
    }

    #[test]
    fn overrides_replace_fields_and_skip_bad_locale() {
        let cfg = FormConfig::default().with_overrides_from(|k| match k {
            "VEEZIE_INSTALL_PREFIX" => Some("stremio-dev://install/".to_string()),
            "VEEZIE_LOCALE" => Some("klingon".to_string()),
            _ => None,
        });
        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.install_prefix, "stremio-dev://install/");
        assert_eq!(cfg.locale, Locale::It);
    }

    #[test]
    fn install_link_prefixes_value_verbatim() {
        let cfg = FormConfig::default();
        assert_eq!(cfg.install_link("https://h/abc/manifest.json"), "stremio://install/https://h/abc/manifest.json");
    }
}
