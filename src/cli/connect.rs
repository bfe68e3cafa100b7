//! Connect command - run the live client against a server.

use anyhow::Result;

use crate::client::{self, Dispatcher};
use crate::config::{ClientConfig, EngineKind};
use crate::host::MemoryPage;
use crate::script::{DisabledEngine, JsEngine};

/// Run the connect command
pub fn run_connect(config: &ClientConfig) -> Result<()> {
    let page = MemoryPage::new(&config.page.root_id, &config.page.title);

    match config.script.engine {
        EngineKind::Js => {
            let engine = JsEngine::new()?;
            client::run(&mut Dispatcher::new(page, engine));
        }
        EngineKind::Off => {
            crate::log!("script"; "engine disabled, script requests will be refused");
            client::run(&mut Dispatcher::new(page, DisabledEngine));
        }
    }

    Ok(())
}
