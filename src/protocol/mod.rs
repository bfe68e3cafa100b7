//! Live-update wire protocol.
//!
//! Defines the JSON message format exchanged with the development server
//! over WebSocket, plus the structured content tree it can carry.
//!
//! # Message kinds
//!
//! Inbound (server → client), discriminated by a numeric `type` field:
//! - `1`: content update (pre-rendered markup or a structured tree)
//! - `2`: script request (run code, send the outcome back)
//!
//! Outbound (client → server):
//! - handshake: `{"path": "/current/page/"}`, sent once per connection
//! - script reply: `{"type": 2, "ctnt": ...}` on success,
//!   `{"type": 2.1, "mesg": ..., "name": ..., "caus": ...}` on failure
//!
//! The `2.1` failure discriminator is a wire-compatibility requirement;
//! internally a script reply is the two-case [`ScriptReply`] and only the
//! encoder knows the literal values.

mod envelope;
mod error;
mod node;

pub use envelope::{Inbound, Metadata, Outbound, PageContent, ScriptReply};
pub use error::ProtocolError;
pub use node::{AttrValue, ContentNode, ElementNode};
