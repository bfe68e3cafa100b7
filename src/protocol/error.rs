//! Protocol decode errors.

use thiserror::Error;

/// Errors raised while decoding an inbound frame.
///
/// Every variant is a `MalformedMessage` condition at the dispatcher:
/// the frame is logged and dropped, the connection stays open.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("invalid frame encoding: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("frame is not a JSON object")]
    NotAnObject,

    #[error("missing or non-numeric `type` discriminator")]
    MissingKind,

    #[error("unknown message kind `{0}`")]
    UnknownKind(f64),

    #[error("missing or non-boolean `initial` flag")]
    MissingInitial,

    #[error("unknown content type `{0}`")]
    UnknownContentType(String),

    #[error("`ctnt` must be a string for markup content")]
    MarkupNotString,
}
