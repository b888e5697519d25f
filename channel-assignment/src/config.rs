//! Configuration loading
//!
//! Priority order for every setting:
//! 1. Command-line argument / environment variable (handled by clap)
//! 2. TOML config file
//! 3. Compiled default

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::engine::ChannelLayout;
use crate::error::{Error, Result};
use crate::layout::{default_layout, load_layout};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "channel-assignment.toml";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// On-disk TOML shape
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub server: ServerSection,
    pub assignment: AssignmentSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AssignmentSection {
    /// JSON console layout used when a request brings none
    pub layout: Option<PathBuf>,
    /// Title printed at the top of channel sheets
    pub title: Option<String>,
}

/// Resolved settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub layout_path: Option<PathBuf>,
    pub title: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            layout_path: None,
            title: "Channel Assignments".to_string(),
        }
    }
}

/// Values given on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub layout_path: Option<PathBuf>,
    pub title: Option<String>,
}

impl Settings {
    /// Merges overrides over the file config over defaults
    pub fn resolve(file: FileConfig, overrides: Overrides) -> Settings {
        let defaults = Settings::default();
        Settings {
            host: overrides.host.or(file.server.host).unwrap_or(defaults.host),
            port: overrides.port.or(file.server.port).unwrap_or(defaults.port),
            layout_path: overrides.layout_path.or(file.assignment.layout),
            title: overrides.title.or(file.assignment.title).unwrap_or(defaults.title),
        }
    }

    /// The configured layout file, or the built-in console
    pub fn load_layout(&self) -> Result<ChannelLayout> {
        match &self.layout_path {
            Some(path) => load_layout(path),
            None => Ok(default_layout()),
        }
    }
}

/// Parses a TOML config file
pub fn load_config_file(path: &Path) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
    let config: FileConfig = toml::from_str(&content)?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Explicit path must exist; the implicit default file is optional
pub fn find_config(explicit: Option<&Path>) -> Result<FileConfig> {
    if let Some(path) = explicit {
        return load_config_file(path);
    }

    let fallback = Path::new(DEFAULT_CONFIG_FILE);
    if fallback.exists() {
        load_config_file(fallback)
    } else {
        debug!("No config file, using defaults");
        Ok(FileConfig::default())
    }
}
