use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::loader::DEFAULT_BOOTSTRAP_URL;
use crate::shell::ShellOptions;

pub const BOOTSTRAP_URL_ENV: &str = "OFFICEUI_BOOTSTRAP_URL";
pub const RESOURCE_ROOT_ENV: &str = "OFFICEUI_RESOURCE_ROOT";

/// Host-side settings: where the shell's documents live and where it keeps
/// state between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_bootstrap_url")]
    pub bootstrap_url: String,
    /// A directory, or an `http(s)://` base URL.
    #[serde(default = "default_resource_root")]
    pub resource_root: String,
    #[serde(default)]
    pub state_file: Option<PathBuf>,
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

fn default_bootstrap_url() -> String {
    DEFAULT_BOOTSTRAP_URL.to_string()
}

fn default_resource_root() -> String {
    ".".to_string()
}

fn default_log_file() -> String {
    "officeui.log".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bootstrap_url: default_bootstrap_url(),
            resource_root: default_resource_root(),
            state_file: None,
            log_file: default_log_file(),
        }
    }
}

pub const SETTING_NAMES: &[&str] = &["bootstrap_url", "resource_root", "state_file", "log_file"];

impl Settings {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("officeui");
        Ok(config_dir.join("config.toml"))
    }

    /// Read the settings file; a missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &PathBuf) -> Result<Self> {
        debug!("Loading settings from: {:?}", config_path);

        if !config_path.exists() {
            info!("Settings file doesn't exist, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read settings file: {:?}", config_path))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {:?}", config_path))
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &PathBuf) -> Result<()> {
        if let Some(dir) = config_path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory: {:?}", dir))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize settings to TOML")?;
        fs::write(config_path, content)
            .with_context(|| format!("Failed to write settings file: {:?}", config_path))?;

        info!("Settings saved to {:?}", config_path);
        Ok(())
    }

    /// Apply `OFFICEUI_*` environment overrides (including a `.env` file).
    pub fn with_env_overrides(mut self) -> Self {
        dotenvy::dotenv().ok();

        if let Ok(url) = std::env::var(BOOTSTRAP_URL_ENV) {
            debug!("{} overrides bootstrap_url", BOOTSTRAP_URL_ENV);
            self.bootstrap_url = url;
        }
        if let Ok(root) = std::env::var(RESOURCE_ROOT_ENV) {
            debug!("{} overrides resource_root", RESOURCE_ROOT_ENV);
            self.resource_root = root;
        }
        self
    }

    pub fn state_file_path(&self) -> Result<PathBuf> {
        match &self.state_file {
            Some(path) => Ok(path.clone()),
            None => Ok(dirs::data_dir()
                .context("Failed to get data directory")?
                .join("officeui")
                .join("state.json")),
        }
    }

    /// Open the log file, truncating output from the previous run.
    pub fn open_log_file(&self) -> Result<fs::File> {
        fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.log_file)
            .with_context(|| format!("Failed to open log file: {}", self.log_file))
    }

    pub fn shell_options(&self) -> ShellOptions {
        ShellOptions {
            bootstrap_url: self.bootstrap_url.clone(),
        }
    }

    pub fn get(&self, name: &str) -> Result<String> {
        match name {
            "bootstrap_url" => Ok(self.bootstrap_url.clone()),
            "resource_root" => Ok(self.resource_root.clone()),
            "state_file" => Ok(self
                .state_file
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_default()),
            "log_file" => Ok(self.log_file.clone()),
            _ => anyhow::bail!("Unknown setting '{}'", name),
        }
    }

    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "bootstrap_url" => self.bootstrap_url = value.to_string(),
            "resource_root" => self.resource_root = value.to_string(),
            "state_file" => {
                self.state_file = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            "log_file" => self.log_file = value.to_string(),
            _ => anyhow::bail!("Unknown setting '{}'", name),
        }
        Ok(())
    }

    pub fn reset(&mut self, name: &str) -> Result<()> {
        let defaults = Self::default();
        let value = defaults.get(name)?;
        self.set(name, &value)
    }
}
