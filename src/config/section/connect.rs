//! `[connect]` section configuration.
//!
//! Contains server connection settings.
//!
//! # Example
//!
//! ```toml
//! [connect]
//! host = "localhost:8000"     # Server address (host or host:port)
//! tls = false                 # true = wss://, false = ws://
//! page = "/docs/setup/"       # Page path announced in the handshake
//! reconnect_delay_ms = 1000   # Wait between reconnect attempts
//! poll_interval_ms = 100      # Socket poll cadence when idle
//! ```

use serde::{Deserialize, Serialize};

use crate::core::PagePath;

/// Server connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectConfig {
    /// Server address as `host` or `host:port`, without a scheme.
    pub host: String,

    /// Connect with `wss://` instead of `ws://`.
    pub tls: bool,

    /// Page path announced in the handshake.
    /// Normalized to start and end with `/`.
    pub page: PagePath,

    /// Delay between reconnect attempts, in milliseconds.
    pub reconnect_delay_ms: u64,

    /// Sleep between socket polls when no frame is pending,
    /// in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for ConnectConfig {
    fn default() -> Self {
        Self {
            host: "localhost:8000".to_string(),
            tls: false,
            page: PagePath::default(),
            reconnect_delay_ms: 1000,
            poll_interval_ms: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_connect_defaults() {
        let config = test_parse_config("");

        assert_eq!(config.connect.host, "localhost:8000");
        assert!(!config.connect.tls);
        assert_eq!(config.connect.page.as_str(), "/");
        assert_eq!(config.connect.reconnect_delay_ms, 1000);
        assert_eq!(config.connect.poll_interval_ms, 100);
    }

    #[test]
    fn test_connect_override() {
        let config = test_parse_config(
            "[connect]\nhost = \"pages.example.com:9000\"\ntls = true\npage = \"docs/setup\"",
        );

        assert_eq!(config.connect.host, "pages.example.com:9000");
        assert!(config.connect.tls);
        // Path is normalized on deserialization
        assert_eq!(config.connect.page.as_str(), "/docs/setup/");
    }

    #[test]
    fn test_connect_partial_override() {
        let config = test_parse_config("[connect]\nreconnect_delay_ms = 250");

        // reconnect delay is overridden
        assert_eq!(config.connect.reconnect_delay_ms, 250);
        // everything else uses defaults
        assert_eq!(config.connect.host, "localhost:8000");
        assert_eq!(config.connect.poll_interval_ms, 100);
    }
}
