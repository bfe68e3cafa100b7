//! `[page]` section configuration.
//!
//! Names the host page the client renders into.
//!
//! # Example
//!
//! ```toml
//! [page]
//! root_id = "root"       # Element id of the content mount point
//! title = "pagewire"     # Document title before the first update
//! ```

use serde::{Deserialize, Serialize};

/// Host page settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Element id of the mount point all delivered content lands under.
    pub root_id: String,

    /// Document title shown before the first update arrives, and
    /// restored on every reload.
    pub title: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            root_id: "root".to_string(),
            title: "pagewire".to_string(),
        }
    }
}
