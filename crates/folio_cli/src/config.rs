//! Folio configuration file handling
//!
//! `folio.toml` holds the page layout, the simulation clock, the contact
//! relay account and where preferences are persisted. Every table is
//! optional; a missing file means the built-in portfolio page.
//!
//! Relay credentials can also come from the environment
//! (`FOLIO_SERVICE_ID`, `FOLIO_TEMPLATE_ID`, `FOLIO_PUBLIC_KEY`), which wins
//! over the file.

use anyhow::{Context, Result};
use folio_content::contact::EMAILJS_ENDPOINT;
use folio_content::RelayCredentials;
use folio_widgets::PageConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "folio.toml";

pub const ENV_SERVICE_ID: &str = "FOLIO_SERVICE_ID";
pub const ENV_TEMPLATE_ID: &str = "FOLIO_TEMPLATE_ID";
pub const ENV_PUBLIC_KEY: &str = "FOLIO_PUBLIC_KEY";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub page: PageConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    #[serde(default)]
    pub preferences: PreferencesConfig,
}

/// Frame clock for headless runs
#[derive(Debug, Deserialize, Serialize)]
pub struct SimulationConfig {
    #[serde(default = "default_frame_ms")]
    pub frame_ms: f32,
    /// Time a full top-to-bottom sweep takes
    #[serde(default = "default_sweep_ms")]
    pub sweep_ms: f32,
    /// Extra time after the sweep for reveals to settle
    #[serde(default = "default_settle_ms")]
    pub settle_ms: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            frame_ms: default_frame_ms(),
            sweep_ms: default_sweep_ms(),
            settle_ms: default_settle_ms(),
        }
    }
}

fn default_frame_ms() -> f32 {
    16.0
}

fn default_sweep_ms() -> f32 {
    6000.0
}

fn default_settle_ms() -> f32 {
    2000.0
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ContactConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default, flatten)]
    pub credentials: RelayCredentials,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            credentials: RelayCredentials::default(),
        }
    }
}

fn default_endpoint() -> String {
    EMAILJS_ENDPOINT.to_string()
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PreferencesConfig {
    #[serde(default = "default_preferences_path")]
    pub path: PathBuf,
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            path: default_preferences_path(),
        }
    }
}

fn default_preferences_path() -> PathBuf {
    PathBuf::from(".folio/preferences.json")
}

impl FolioConfig {
    /// Load an explicit file, or `folio.toml` in the current directory
    ///
    /// An explicit path must exist; the implicit one may be missing.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_file(path)?,
            None => {
                let path = Path::new(CONFIG_FILE);
                if path.exists() {
                    Self::load_file(path)?
                } else {
                    tracing::debug!("No {} found, using built-in page", CONFIG_FILE);
                    Self::default()
                }
            }
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: FolioConfig = toml::from_str(content)?;
        config.page.validate()?;
        Ok(config)
    }

    /// Replace relay credentials with non-empty values from `lookup`
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let credentials = &mut self.contact.credentials;
        for (key, slot) in [
            (ENV_SERVICE_ID, &mut credentials.service_id),
            (ENV_TEMPLATE_ID, &mut credentials.template_id),
            (ENV_PUBLIC_KEY, &mut credentials.public_key),
        ] {
            if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
                *slot = value;
            }
        }
    }
}
