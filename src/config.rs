//! Configuration file support for metasnap
//!
//! This module handles parsing `.metasnap.toml` configuration files that set
//! defaults for the command line and trim the tag table.
//!
//! ## Configuration File Format
//!
//! ```toml
//! # .metasnap.toml
//!
//! [output]
//! # Default format of `metasnap render`: text | markdown | json | html
//! format = "text"
//!
//! [server]
//! port = 3000
//! open_browser = true
//!
//! [tags]
//! # Tag keys hidden from the tag table (glob patterns)
//! exclude = ["structuredData", "twitter*"]
//! ```

use glob::Pattern;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::cli_output::OutputFormat;
use crate::view::ViewOptions;

/// Config file names, in lookup order
const CONFIG_NAMES: [&str; 2] = [".metasnap.toml", "metasnap.toml"];

/// Errors that can occur when loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid glob pattern: {0}")]
    PatternError(String),

    #[error("Unknown output format: {0}")]
    FormatError(String),
}

/// Output configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

/// Web server configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_port")]
    pub port: u16,

    /// Open the page in a browser once the server is up
    #[serde(default = "default_open_browser")]
    pub open_browser: bool,
}

fn default_port() -> u16 {
    3000
}

fn default_open_browser() -> bool {
    true
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            port: default_port(),
            open_browser: default_open_browser(),
        }
    }
}

/// Tag table configuration section
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TagsConfig {
    /// Tag keys to hide from the tag table
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct MetasnapConfig {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub tags: TagsConfig,
}

/// Compiled configuration with glob patterns
#[derive(Debug, Clone)]
pub struct CompiledConfig {
    pub format: OutputFormat,
    pub port: u16,
    pub open_browser: bool,
    /// Patterns for tag keys hidden from the tag table
    exclude_patterns: Vec<Pattern>,
}

impl CompiledConfig {
    /// Create a compiled config from raw config
    pub fn from_config(config: MetasnapConfig) -> Result<Self, ConfigError> {
        let exclude_patterns = config
            .tags
            .exclude
            .iter()
            .map(|p| Pattern::new(p).map_err(|e| ConfigError::PatternError(format!("{}: {}", p, e))))
            .collect::<Result<Vec<_>, _>>()?;

        let format = OutputFormat::parse(&config.output.format)
            .ok_or_else(|| ConfigError::FormatError(config.output.format.clone()))?;

        Ok(Self {
            format,
            port: config.server.port,
            open_browser: config.server.open_browser,
            exclude_patterns,
        })
    }

    /// Create an empty config (all defaults)
    pub fn empty() -> Self {
        Self {
            format: OutputFormat::default(),
            port: default_port(),
            open_browser: default_open_browser(),
            exclude_patterns: Vec::new(),
        }
    }

    /// Check if a tag key is hidden from the tag table
    pub fn is_excluded_tag(&self, key: &str) -> bool {
        self.exclude_patterns.iter().any(|p| p.matches(key))
    }

    /// View options derived from this config
    pub fn view_options(&self) -> ViewOptions {
        ViewOptions::with_excluded_tags(self.exclude_patterns.clone())
    }
}

impl Default for CompiledConfig {
    fn default() -> Self {
        Self::empty()
    }
}

/// Load configuration starting from the given path
///
/// Searches for `.metasnap.toml` in the given directory and parent directories.
pub fn load_config(start_path: &Path) -> Result<MetasnapConfig, ConfigError> {
    match find_config_file(start_path) {
        Some(path) => load_config_file(&path),
        None => Ok(MetasnapConfig::default()),
    }
}

/// Load configuration from an explicit file
pub fn load_config_file(path: &Path) -> Result<MetasnapConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: MetasnapConfig = toml::from_str(&content)?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Find the config file by searching up the directory tree
pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
    let mut current = if start_path.is_file() {
        start_path.parent()?.to_path_buf()
    } else {
        start_path.to_path_buf()
    };

    loop {
        for name in &CONFIG_NAMES {
            let config_path = current.join(name);
            if config_path.exists() {
                return Some(config_path);
            }
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => break,
        }
    }

    None
}

/// Load and compile configuration
///
/// An explicit file wins over the directory search.
pub fn load_compiled_config(
    explicit: Option<&Path>,
    start_path: &Path,
) -> Result<CompiledConfig, ConfigError> {
    let config = match explicit {
        Some(path) => load_config_file(path)?,
        None => load_config(start_path)?,
    };
    CompiledConfig::from_config(config)
}
