//! `[script]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [script]
//! engine = "js"    # "js" runs script requests, "off" refuses them
//! ```
//!
//! With `engine = "off"` every script request still gets a response,
//! but always the failure envelope.

use serde::{Deserialize, Serialize};

/// Which executor backs script requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Embedded JavaScript engine.
    Js,
    /// Refuse every request with an error response.
    Off,
}

/// Script execution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptConfig {
    /// Script engine selection.
    pub engine: EngineKind,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            engine: EngineKind::Js,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EngineKind;
    use crate::config::test_parse_config;

    #[test]
    fn test_script_defaults_to_js() {
        let config = test_parse_config("");
        assert_eq!(config.script.engine, EngineKind::Js);
    }

    #[test]
    fn test_script_engine_off() {
        let config = test_parse_config("[script]\nengine = \"off\"");
        assert_eq!(config.script.engine, EngineKind::Off);
    }
}
