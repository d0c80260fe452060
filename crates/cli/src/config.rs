use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "tagtrail.toml";
pub const CORPUS_ENV: &str = "TAGTRAIL_CORPUS";
pub const SERVICE_URL_ENV: &str = "TAGTRAIL_SERVICE_URL";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ExplorerConfig {
    /// JSON document list
    pub corpus: PathBuf,
    /// Random facets offered before anything is selected
    pub suggestions: usize,
    /// Rows in the most-used tags listing
    pub top_tags: usize,
    /// Base URL of the translation / question-answering service
    pub service_url: String,
    pub timeout_seconds: u64,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            corpus: PathBuf::from("json/sb.json"),
            suggestions: 5,
            top_tags: 10,
            service_url: "http://127.0.0.1:8000".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl ExplorerConfig {
    /// Load the file given with `--config`, or `tagtrail.toml` from the
    /// working directory when present.
    ///
    /// An explicit file must exist and parse. The implicit one is skipped
    /// with a warning when it does not parse.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            return Self::from_toml_str(&raw)
                .with_context(|| format!("Failed to parse config {}", path.display()));
        }

        let path = Path::new(DEFAULT_CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let parsed = std::fs::read_to_string(path)
            .map_err(anyhow::Error::from)
            .and_then(|raw| Self::from_toml_str(&raw));
        match parsed {
            Ok(config) => {
                log::debug!("Loaded config from {}", path.display());
                Ok(config)
            }
            Err(err) => {
                log::warn!("Config parse error {}: {err:#}; using defaults", path.display());
                Ok(Self::default())
            }
        }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(corpus) = lookup(CORPUS_ENV).filter(|v| !v.trim().is_empty()) {
            self.corpus = PathBuf::from(corpus);
        }
        if let Some(url) = lookup(SERVICE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.service_url = url;
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ExplorerConfig::from_toml_str("suggestions = 8\n").expect("config");
        assert_eq!(config.suggestions, 8);
        assert_eq!(config.top_tags, 10);
        assert_eq!(config.corpus, PathBuf::from("json/sb.json"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(ExplorerConfig::from_toml_str("sugestions = 8\n").is_err());
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config =
            ExplorerConfig::from_toml_str("corpus = \"a.json\"\nservice_url = \"http://x\"\n")
                .expect("config");
        let env: HashMap<&str, &str> = [(CORPUS_ENV, "b.json"), (SERVICE_URL_ENV, " ")].into();
        config.apply_env_from(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.corpus, PathBuf::from("b.json"));
        assert_eq!(config.service_url, "http://x");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = ExplorerConfig::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to read config"));
    }
}
