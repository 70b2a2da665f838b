//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/bintree/bintree.toml`
//! 3. Explicit config file (`--config <path>`)
//! 4. Environment variables: `BINTREE_*` prefix (`BINTREE_RENDER__PLACEHOLDER` for nested keys)
//!
//! Command line flags are applied on top by the CLI layer.

use std::path::{Path, PathBuf};

use config::{Config, Environment, Map};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::PrintStyle;

/// Configuration errors: unreadable or malformed files, invalid env values.
#[derive(Error, Debug)]
#[error("config error: {message}")]
pub struct SettingsError {
    pub message: String,
}

impl SettingsError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Output rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RenderConfig {
    /// Prefix of every level line
    pub indent: String,
    /// Between two slots of a level line
    pub separator: String,
    /// Marker for an empty child slot
    pub placeholder: String,
    /// Between values of a traversal listing
    pub sequence_separator: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let style = PrintStyle::default();
        Self {
            indent: style.indent,
            separator: style.separator,
            placeholder: style.placeholder,
            sequence_separator: ", ".into(),
        }
    }
}

/// Raw render config for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawRenderConfig {
    pub indent: Option<String>,
    pub separator: Option<String>,
    pub placeholder: Option<String>,
    pub sequence_separator: Option<String>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub max_levels: Option<u32>,
    pub max_nodes: Option<u32>,
    pub count: Option<usize>,
    pub seed: Option<u64>,
    pub render: RawRenderConfig,
}

impl RenderConfig {
    fn merge(&self, overlay: &RawRenderConfig) -> Self {
        Self {
            indent: overlay.indent.clone().unwrap_or_else(|| self.indent.clone()),
            separator: overlay
                .separator
                .clone()
                .unwrap_or_else(|| self.separator.clone()),
            placeholder: overlay
                .placeholder
                .clone()
                .unwrap_or_else(|| self.placeholder.clone()),
            sequence_separator: overlay
                .sequence_separator
                .clone()
                .unwrap_or_else(|| self.sequence_separator.clone()),
        }
    }

    pub fn print_style(&self) -> PrintStyle {
        PrintStyle {
            indent: self.indent.clone(),
            separator: self.separator.clone(),
            placeholder: self.placeholder.clone(),
        }
    }
}

/// Unified configuration for bintree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Level budget for unconstrained random trees
    pub max_levels: u32,
    /// Exclusive bound for BST node count and values
    pub max_nodes: u32,
    /// Trees generated per run
    pub count: usize,
    /// Seed for the random source (default: entropy)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Rendering settings
    pub render: RenderConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_levels: 6,
            max_nodes: 15,
            count: 2,
            seed: None,
            render: RenderConfig::default(),
        }
    }
}

/// Get the XDG config directory for bintree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "bintree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("bintree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, SettingsError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| SettingsError::new(format!("read {}: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| SettingsError::new(format!("parse {}: {}", path.display(), e)))
}

impl Settings {
    /// Merge overlay config onto self (base): overlay wins where specified.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            max_levels: overlay.max_levels.unwrap_or(self.max_levels),
            max_nodes: overlay.max_nodes.unwrap_or(self.max_nodes),
            count: overlay.count.unwrap_or(self.count),
            seed: overlay.seed.or(self.seed),
            render: self.render.merge(&overlay.render),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; unlike the global file it must exist
    pub fn load(config_file: Option<&Path>) -> Result<Self, SettingsError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("Loading global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        // 3. Explicit config file
        if let Some(path) = config_file {
            debug!("Loading config file: {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Environment variables
        current.apply_env_overrides(None)
    }

    /// Apply `BINTREE_*` variables as explicit overrides.
    ///
    /// `vars` replaces the process environment as variable source when given.
    pub fn apply_env_overrides(
        mut self,
        vars: Option<Map<String, String>>,
    ) -> Result<Self, SettingsError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("BINTREE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(vars),
            )
            .build()
            .map_err(config_err)?;

        if let Some(val) = env_value(&config, "max_levels")? {
            self.max_levels = val;
        }
        if let Some(val) = env_value(&config, "max_nodes")? {
            self.max_nodes = val;
        }
        if let Some(val) = env_value(&config, "count")? {
            self.count = val;
        }
        if let Some(val) = env_value(&config, "seed")? {
            self.seed = Some(val);
        }
        if let Some(val) = env_value(&config, "render.indent")? {
            self.render.indent = val;
        }
        if let Some(val) = env_value(&config, "render.separator")? {
            self.render.separator = val;
        }
        if let Some(val) = env_value(&config, "render.placeholder")? {
            self.render.placeholder = val;
        }
        if let Some(val) = env_value(&config, "render.sequence_separator")? {
            self.render.sequence_separator = val;
        }

        Ok(self)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        toml::to_string_pretty(self)
            .map_err(|e| SettingsError::new(format!("serialize config: {e}")))
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# bintree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/bintree/bintree.toml
#   File:   bintree --config <path>
#   Env:    BINTREE_* environment variables (BINTREE_RENDER__PLACEHOLDER for [render] keys)
#   Flags:  command line options

# Level budget for `bintree random`
# max_levels = 6

# Exclusive bound for node count and values of `bintree bst`
# max_nodes = 15

# Trees generated per run
# count = 2

# Fixed seed for reproducible trees (default: random)
# seed = 42

[render]
# Prefix of every level line
# indent = "  "

# Between two slots of a level line
# separator = " "

# Marker for an empty child slot
# placeholder = "."

# Between values of a traversal listing
# sequence_separator = ", "
"#
        .to_string()
    }
}

fn env_value<T: DeserializeOwned>(config: &Config, key: &str) -> Result<Option<T>, SettingsError> {
    match config.get::<T>(key) {
        Ok(val) => Ok(Some(val)),
        Err(config::ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(SettingsError::new(format!("{key}: {e}"))),
    }
}

fn config_err(e: config::ConfigError) -> SettingsError {
    SettingsError::new(e.to_string())
}
