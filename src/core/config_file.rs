//! User configuration file handling
//!
//! Manages settings from ~/.config/anchor-dropper/settings.json and the
//! persisted rule table next to it.

use crate::anchors::{default_table, PlacementOptions, RuleTable};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const APP_DIR: &str = "anchor-dropper";

/// User configuration from ~/.config/anchor-dropper/settings.json
///
/// These settings override built-in defaults but are overridden by CLI arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Replace existing anchors when dropping
    pub overwrite: bool,
    /// Treat anchors containing "left" as directional
    pub directional_left: bool,
    /// Rule table location, if not the one in the config directory
    pub rules_path: Option<PathBuf>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            overwrite: false,
            directional_left: true,
            rules_path: None,
        }
    }
}

impl ConfigFile {
    /// Get the path to the anchor-dropper config directory
    pub fn config_dir() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")));
        config_dir.join(APP_DIR)
    }

    /// Get the path to the user config file
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("settings.json")
    }

    /// Get the path to the persisted rule table
    pub fn default_rules_path() -> PathBuf {
        Self::config_dir().join("rules.json")
    }

    /// Get the path to the logs directory
    pub fn logs_dir() -> PathBuf {
        Self::config_dir().join("logs")
    }

    /// Load configuration from the user config file
    pub fn load() -> Option<Self> {
        Self::load_from(Self::config_path())
    }

    pub fn load_from(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    debug!("Loaded user settings from {:?}", path);
                    Some(config)
                }
                Err(e) => {
                    warn!("Failed to parse {:?}: {}", path, e);
                    None
                }
            },
            Err(e) => {
                warn!("Failed to read {:?}: {}", path, e);
                None
            }
        }
    }

    /// Save configuration to the user config file
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(Self::config_path())
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        debug!("Saved settings to {:?}", path);
        Ok(())
    }

    pub fn rules_path(&self) -> PathBuf {
        self.rules_path
            .clone()
            .unwrap_or_else(Self::default_rules_path)
    }

    /// The persisted rule table, or the built-in one when missing or corrupt
    pub fn load_rule_table(&self) -> RuleTable {
        RuleTable::load_or(self.rules_path(), default_table)
    }

    pub fn save_rule_table(&self, table: &RuleTable) -> anyhow::Result<()> {
        table.save(self.rules_path())
    }

    pub fn placement_options(&self) -> PlacementOptions {
        PlacementOptions {
            directional_left: self.directional_left,
        }
    }

    /// Initialize the complete user configuration directory
    ///
    /// This creates:
    /// 1. The ~/.config/anchor-dropper directory with its logs/ folder
    /// 2. A settings.json file with default values
    /// 3. A rules.json file holding the built-in rule table
    pub fn initialize_config_directory() -> anyhow::Result<()> {
        let config_dir = Self::config_dir();
        fs::create_dir_all(&config_dir)?;
        println!("Created config directory: {:?}", config_dir);

        let logs_dir = Self::logs_dir();
        fs::create_dir_all(&logs_dir)?;
        println!("Created logs directory: {:?}", logs_dir);

        let settings_path = Self::config_path();
        if !settings_path.exists() {
            ConfigFile::default().save()?;
            println!("Created settings file: {:?}", settings_path);
        } else {
            println!("Settings file already exists: {:?}", settings_path);
        }

        let rules_path = Self::default_rules_path();
        if !rules_path.exists() {
            default_table().save(&rules_path)?;
            println!("Created rule table: {:?}", rules_path);
        } else {
            println!("Rule table already exists: {:?}", rules_path);
        }

        println!("\nConfiguration initialized successfully!");
        println!("You can now:");
        println!("  - Edit settings at: {:?}", settings_path);
        println!("  - Edit anchor rules in: {:?}", rules_path);
        println!("  - View application logs in: {:?}", logs_dir);

        Ok(())
    }
}
