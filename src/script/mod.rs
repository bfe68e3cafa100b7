//! Server-driven script execution.
//!
//! A `script-request` frame carries code the server wants evaluated on
//! this page; the captured value (or failure) goes back over the same
//! connection. [`Executor`] is the seam, [`JsEngine`] the JavaScript
//! implementation, [`DisabledEngine`] the opt-out.

mod engine;
mod executor;

pub use engine::JsEngine;
pub use executor::{DisabledEngine, ExecutionError, Executor};
