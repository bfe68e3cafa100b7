//! Frame routing: decode each inbound frame and apply it to the page.

use crate::host::HostPage;
use crate::protocol::{Inbound, Metadata, Outbound, PageContent, ScriptReply};
use crate::resource::ResourceLoader;
use crate::script::Executor;

use super::preview;

/// What the session loop should do after a frame was handled.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Frame fully handled; wait for the next one.
    None,
    /// Send this envelope back over the connection the frame arrived
    /// on. Never queued: when the send fails the reply is gone.
    Reply(Outbound),
    /// Tear the connection down and reconnect. The fresh handshake
    /// makes the server deliver initial content again.
    Restart,
}

/// Routes decoded frames to the page, the resource loader and the
/// script engine.
///
/// Frames are handled one at a time, to completion, so inbound order
/// is preserved and script executions never overlap.
pub struct Dispatcher<P: HostPage, E: Executor> {
    page: P,
    engine: E,
    resources: ResourceLoader,
}

impl<P: HostPage, E: Executor> Dispatcher<P, E> {
    pub fn new(page: P, engine: E) -> Self {
        Self {
            page,
            engine,
            resources: ResourceLoader::new(),
        }
    }

    /// The page this dispatcher writes to.
    pub fn page(&self) -> &P {
        &self.page
    }

    /// Handle one raw frame. Never fails: a frame that cannot be
    /// decoded is logged and dropped, and the connection stays open.
    pub fn handle(&mut self, raw: &str) -> Action {
        let frame = match Inbound::from_json(raw) {
            Ok(frame) => frame,
            Err(e) => {
                crate::log!("error"; "dropping malformed frame: {e}");
                crate::debug!("error"; "frame was: {}", preview::shorten(raw, 160));
                return Action::None;
            }
        };

        match frame {
            Inbound::Reload => self.restart(),
            Inbound::Update {
                content,
                meta,
                requires,
            } => {
                self.apply_update(content, meta, &requires);
                Action::None
            }
            Inbound::ScriptRequest { code } => Action::Reply(self.run_script(&code)),
        }
    }

    /// Non-initial update: the server-side structure changed, so local
    /// state is discarded and the connection replaced. Storage kept by
    /// the script engine survives, like a browser reload.
    fn restart(&mut self) -> Action {
        crate::log!("page"; "restart requested, reloading");
        self.page.reset();
        self.resources.clear();
        if let Err(e) = self.engine.reset() {
            crate::log!("error"; "script engine rebuild failed: {e}");
        }
        Action::Restart
    }

    fn apply_update(&mut self, content: PageContent, meta: Metadata, requires: &[String]) {
        crate::log!("page"; "updated: {}", content.summary());

        match content {
            PageContent::Markup(markup) => {
                self.page.set_markup(&markup);
                if let Some(theme) = meta.theme.as_deref() {
                    crate::theme::apply(&mut self.page, theme);
                }
                if let Some(title) = meta.title.as_deref() {
                    self.page.set_title(title);
                    crate::debug!("page"; "title: {title}");
                }
                crate::debug_do! {
                    let text = preview::markup_text(&markup, 96);
                    if !text.is_empty() {
                        crate::debug!("page"; "text: {text}");
                    }
                }
            }
            PageContent::Structured(tree) => {
                // Attachment is initiated in order but not awaited;
                // theme and title do not apply on this path
                for locator in requires {
                    self.resources.ensure(&mut self.page, locator);
                }
                match crate::render::render(&mut self.page, &tree) {
                    Ok(rendered) => {
                        let root = self.page.root();
                        self.page.append_child(root, rendered);
                    }
                    Err(e) => crate::log!("error"; "content rejected: {e}"),
                }
            }
        }
    }

    fn run_script(&mut self, code: &str) -> Outbound {
        crate::debug!("script"; "evaluating {} bytes", code.len());
        let reply = match self.engine.run(&mut self.page, code) {
            Ok(value) => ScriptReply::value(value),
            Err(e) => {
                crate::log!("script"; "execution failed: {e}");
                e.into()
            }
        };
        Outbound::Reply(reply)
    }
}
