use crate::error::{Error, Result};
use crate::generate::GeminiClient;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings file name, looked up in the working directory.
pub const CONFIG_FILE: &str = ".docweaverc.toml";

/// Environment variable that overrides the persisted API credential.
pub const API_KEY_ENV: &str = "DOCWEAVE_API_KEY";

/// The statically declared model identifiers the user can pick among.
pub const MODEL_CHOICES: &[&str] = &[
    "gemini-2.0-flash",
    "gemini-2.0-flash-lite",
    "gemini-1.5-pro",
    "gemini-1.5-flash",
];

/// Persisted settings for the generation backend.
///
/// Both `api_key` and `model` are required before the pipeline runs; absence
/// is a configuration error surfaced to the user, not a crash.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub model: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

fn default_endpoint() -> String {
    GeminiClient::DEFAULT_BASE_URL.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: String::new(),
            endpoint: default_endpoint(),
        }
    }
}

impl Settings {
    /// Load settings from `dir`, applying the environment credential
    /// override when set.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.is_file() {
            return Err(Error::Config(format!(
                "{CONFIG_FILE} not found; run `dw model` to create it"
            )));
        }
        let content = fs::read_to_string(&path)?;
        let mut settings: Settings =
            toml::from_str(&content).map_err(|e| Error::Config(e.to_string()))?;
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                settings.api_key = key;
            }
        }
        Ok(settings)
    }

    /// Load settings from `dir`, falling back to defaults when no file
    /// exists yet.
    pub fn load_or_default(dir: &Path) -> Result<Self> {
        if dir.join(CONFIG_FILE).is_file() {
            Self::load(dir)
        } else {
            Ok(Self::default())
        }
    }

    /// Persist settings to `dir`.
    pub fn save(&self, dir: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        fs::write(dir.join(CONFIG_FILE), content)?;
        Ok(())
    }

    /// Check the two required settings are present.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::Config(format!(
                "api_key is not set; add it to {CONFIG_FILE} or export {API_KEY_ENV}"
            )));
        }
        if self.model.trim().is_empty() {
            return Err(Error::Config(
                "model is not set; run `dw model` to pick one".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let settings = Settings {
            api_key: "k-123".to_string(),
            model: "gemini-2.0-flash".to_string(),
            endpoint: "https://example.test".to_string(),
        };
        settings.save(dir.path()).unwrap();

        let loaded = Settings::load(dir.path()).unwrap();
        assert_eq!(loaded.model, "gemini-2.0-flash");
        assert_eq!(loaded.endpoint, "https://example.test");
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            Settings::load(dir.path()),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = tempdir().unwrap();
        let settings = Settings::load_or_default(dir.path()).unwrap();
        assert!(settings.model.is_empty());
        assert_eq!(settings.endpoint, GeminiClient::DEFAULT_BASE_URL);
    }

    #[test]
    fn test_endpoint_defaults_when_absent_from_file() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "api_key = \"k\"\nmodel = \"gemini-1.5-pro\"\n",
        )
        .unwrap();
        let loaded = Settings::load(dir.path()).unwrap();
        assert_eq!(loaded.endpoint, GeminiClient::DEFAULT_BASE_URL);
    }

    #[test]
    fn test_validate_requires_key_and_model() {
        let mut settings = Settings::default();
        assert!(settings.validate().is_err());

        settings.api_key = "k".to_string();
        assert!(settings.validate().is_err());

        settings.model = "gemini-2.0-flash".to_string();
        assert!(settings.validate().is_ok());
    }
}
