//! Client configuration management for `pagewire.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── connect    # [connect]
//! │   ├── page       # [page]
//! │   └── script     # [script]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError
//! │   └── handle     # Global config handle
//! └── mod.rs         # ClientConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section     | Purpose                                     |
//! |-------------|---------------------------------------------|
//! | `[connect]` | Server address, page path, retry timing     |
//! | `[page]`    | Root region id, initial document title      |
//! | `[script]`  | Script engine selection                     |
//!
//! The file is optional: without one, defaults plus CLI flags apply.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

// Re-export from section/
pub use section::{ConnectConfig, EngineKind, PageConfig, ScriptConfig};

// Re-export from types/
pub use types::{ConfigError, cfg, init_config};

use crate::cli::Cli;
use crate::core::PagePath;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing pagewire.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// CLI arguments reference (internal use only)
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Server connection settings
    #[serde(default)]
    pub connect: ConnectConfig,

    /// Host page settings
    #[serde(default)]
    pub page: PageConfig,

    /// Script execution settings
    #[serde(default)]
    pub script: ScriptConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            cli: None,
            config_path: PathBuf::new(),
            connect: ConnectConfig::default(),
            page: PageConfig::default(),
            script: ScriptConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file. A missing file is
    /// not an error; the defaults apply. CLI flags override file values
    /// either way.
    pub fn load(cli: &'static Cli) -> Result<Self> {
        let mut config = match find_config_file(&cli.config) {
            Some(path) => {
                let mut loaded = Self::from_path(&path)?;
                crate::debug!("config"; "loaded {}", path.display());
                loaded.config_path = path;
                loaded
            }
            None => Self::default(),
        };

        config.cli = Some(cli);
        config.apply_cli_options(cli);
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        crate::log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {field}");
        }
    }

    /// Apply CLI flag overrides on top of file values.
    fn apply_cli_options(&mut self, cli: &Cli) {
        if let Some(ref host) = cli.host {
            self.connect.host = host.clone();
        }
        if let Some(ref page) = cli.page {
            // Accept pasted browser locations, percent-encoding and all
            self.connect.page = PagePath::from_location(page);
        }
    }

    /// Validate configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        let host = self.connect.host.trim();
        if host.is_empty() {
            return Err(ConfigError::Validation("connect.host is empty".into()));
        }
        if host.contains("://") {
            return Err(ConfigError::Validation(format!(
                "connect.host `{host}` must not carry a scheme, set tls = true for wss"
            )));
        }
        if self.connect.poll_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "connect.poll_interval_ms must be at least 1".into(),
            ));
        }
        if self.connect.reconnect_delay_ms == 0 {
            return Err(ConfigError::Validation(
                "connect.reconnect_delay_ms must be at least 1".into(),
            ));
        }
        if self.page.root_id.trim().is_empty() {
            return Err(ConfigError::Validation("page.root_id is empty".into()));
        }
        Ok(())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config from TOML content.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> ClientConfig {
    let (parsed, ignored) = ClientConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}
