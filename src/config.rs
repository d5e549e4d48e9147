use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::Tier;

/// Represents the complete configuration for git-promote.
///
/// Controls which remote is used, where the working copy is parked after a
/// run, and the base branch of each tier.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Branch the working copy is returned to after branch creation.
    #[serde(default = "default_return_branch")]
    pub return_branch: String,

    #[serde(default)]
    pub bases: BasesConfig,
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_return_branch() -> String {
    "develop".to_string()
}

/// Per-tier base branch overrides.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BasesConfig {
    #[serde(default = "default_dev_base")]
    pub dev: String,

    #[serde(default = "default_qa_base")]
    pub qa: String,

    #[serde(default = "default_stg_base")]
    pub stg: String,

    #[serde(default = "default_prod_base")]
    pub prod: String,
}

fn default_dev_base() -> String {
    Tier::Dev.default_base().to_string()
}

fn default_qa_base() -> String {
    Tier::Qa.default_base().to_string()
}

fn default_stg_base() -> String {
    Tier::Stg.default_base().to_string()
}

fn default_prod_base() -> String {
    Tier::Prod.default_base().to_string()
}

impl Default for BasesConfig {
    fn default() -> Self {
        BasesConfig {
            dev: default_dev_base(),
            qa: default_qa_base(),
            stg: default_stg_base(),
            prod: default_prod_base(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            remote: default_remote(),
            return_branch: default_return_branch(),
            bases: BasesConfig::default(),
        }
    }
}

impl Config {
    /// Base branch configured for a tier.
    pub fn base_for(&self, tier: Tier) -> &str {
        match tier {
            Tier::Dev => &self.bases.dev,
            Tier::Qa => &self.bases.qa,
            Tier::Stg => &self.bases.stg,
            Tier::Prod => &self.bases.prod,
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitpromote.toml` in current directory
/// 3. `.gitpromote.toml` in user config directory
/// 4. Default configuration if no file found
///
/// A file that exists but cannot be read or parsed is an error.
pub fn load_config(config_path: Option<&str>) -> Result<Config, Box<dyn std::error::Error>> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./gitpromote.toml").exists() {
        fs::read_to_string("./gitpromote.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".gitpromote.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
