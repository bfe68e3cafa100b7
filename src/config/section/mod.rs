//! Configuration section definitions.
//!
//! Each module corresponds to a section in `pagewire.toml`:
//!
//! | Module    | TOML Section | Purpose                              |
//! |-----------|--------------|--------------------------------------|
//! | `connect` | `[connect]`  | Server address, page path, timing    |
//! | `page`    | `[page]`     | Root region id, initial title        |
//! | `script`  | `[script]`   | Script engine selection              |

mod connect;
mod page;
mod script;

pub use connect::ConnectConfig;
pub use page::PageConfig;
pub use script::{EngineKind, ScriptConfig};
