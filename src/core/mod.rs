//! Core types - pure abstractions shared across the codebase.

mod path;
mod state;

pub use path::PagePath;
pub use state::{is_shutdown, setup_shutdown_handler, sleep_unless_shutdown};
