//! Command-line interface module.

mod args;
pub mod connect;
pub mod frame;

pub use args::{Cli, Commands};
