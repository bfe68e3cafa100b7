//! Frame command - decode one frame and show the routing decision.
//!
//! A debugging aid: feed it a frame captured from the server and see
//! what the client would do with it, without opening a connection. The
//! resulting page dump goes to stdout.

use std::io::Read;

use anyhow::{Context, Result, bail};

use crate::client::{Action, Dispatcher};
use crate::config::{ClientConfig, EngineKind};
use crate::host::MemoryPage;
use crate::script::{DisabledEngine, Executor, JsEngine};

/// Run the frame command
pub fn run_frame(frame: Option<&str>, config: &ClientConfig) -> Result<()> {
    let raw = match frame {
        Some(arg) => arg.to_string(),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read frame from stdin")?;
            buffer
        }
    };
    let raw = raw.trim();
    if raw.is_empty() {
        bail!("no frame given, pass JSON as an argument or on stdin");
    }

    let page = MemoryPage::new(&config.page.root_id, &config.page.title);
    match config.script.engine {
        EngineKind::Js => inspect(raw, page, JsEngine::new()?),
        EngineKind::Off => inspect(raw, page, DisabledEngine),
    }
}

/// Dispatch the frame against a scratch page and print the outcome.
fn inspect<E: Executor>(raw: &str, page: MemoryPage, engine: E) -> Result<()> {
    let mut dispatcher = Dispatcher::new(page, engine);

    match dispatcher.handle(raw) {
        Action::None => {
            crate::log!("frame"; "handled in place");
        }
        Action::Reply(reply) => {
            crate::log!("frame"; "would reply: {}", reply.to_json());
        }
        Action::Restart => {
            crate::log!("frame"; "would reload the page and reconnect");
        }
    }

    println!("{}", dispatcher.page().to_html());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_frame_requires_input() {
        let config = ClientConfig::default();
        assert!(run_frame(Some("  "), &config).is_err());
    }

    #[test]
    fn test_run_frame_handles_update() {
        let config = ClientConfig::default();
        let frame = r#"{"type":1,"initial":true,"ctyp":"md","ctnt":"<p>x</p>"}"#;
        assert!(run_frame(Some(frame), &config).is_ok());
    }

    #[test]
    fn test_run_frame_handles_garbage() {
        // Malformed input is not a command failure, it prints the drop
        let config = ClientConfig::default();
        assert!(run_frame(Some("not json"), &config).is_ok());
    }
}
