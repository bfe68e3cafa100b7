//! Inbound and outbound message envelopes.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::error::ProtocolError;
use super::node::ContentNode;

/// Page metadata attached to a content update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

/// Content payload of an update, split by the `ctyp` field.
#[derive(Debug, Clone, PartialEq)]
pub enum PageContent {
    /// Pre-rendered markup (`ctyp: "md"`), mounted verbatim.
    Markup(String),
    /// Structured tree (`ctyp: "py"`), rendered node by node.
    Structured(ContentNode),
}

impl PageContent {
    /// Short description for log lines.
    pub fn summary(&self) -> String {
        match self {
            Self::Markup(text) => format!("markup, {} bytes", text.len()),
            Self::Structured(tree) => format!("tree, {} nodes", tree.node_count()),
        }
    }
}

/// A message received from the server.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    /// Non-initial update: discard current state and start over.
    ///
    /// Decoded from the `initial` flag alone; the rest of the frame is
    /// deliberately not inspected, so a malformed payload cannot block
    /// the restart.
    Reload,

    /// Initial content update carrying the page payload.
    Update {
        content: PageContent,
        meta: Metadata,
        requires: Vec<String>,
    },

    /// Server-initiated script evaluation request.
    ScriptRequest { code: String },
}

/// Body of a `type: 1, initial: true` frame, past the routing fields.
#[derive(Deserialize)]
struct UpdateBody {
    ctyp: String,
    ctnt: Value,
    #[serde(default)]
    meta: Metadata,
    #[serde(default)]
    requires: Vec<String>,
}

/// Body of a `type: 2` frame.
#[derive(Deserialize)]
struct ScriptBody {
    ctnt: String,
}

impl Inbound {
    /// Decode a raw text frame.
    ///
    /// Routing is driven by the numeric `type` discriminator, then for
    /// content updates by the `initial` flag before anything else is
    /// touched. Any error here means the frame is dropped and logged;
    /// the connection is unaffected.
    pub fn from_json(raw: &str) -> Result<Self, ProtocolError> {
        let frame: Value = serde_json::from_str(raw)?;
        if !frame.is_object() {
            return Err(ProtocolError::NotAnObject);
        }
        let kind = frame
            .get("type")
            .and_then(Value::as_f64)
            .ok_or(ProtocolError::MissingKind)?;

        if kind == 1.0 {
            let initial = frame
                .get("initial")
                .and_then(Value::as_bool)
                .ok_or(ProtocolError::MissingInitial)?;
            if !initial {
                return Ok(Self::Reload);
            }

            let body: UpdateBody = serde_json::from_value(frame)?;
            let content = match body.ctyp.as_str() {
                "md" => match body.ctnt {
                    Value::String(text) => PageContent::Markup(text),
                    _ => return Err(ProtocolError::MarkupNotString),
                },
                "py" => PageContent::Structured(serde_json::from_value(body.ctnt)?),
                _ => return Err(ProtocolError::UnknownContentType(body.ctyp)),
            };
            Ok(Self::Update {
                content,
                meta: body.meta,
                requires: body.requires,
            })
        } else if kind == 2.0 {
            let body: ScriptBody = serde_json::from_value(frame)?;
            Ok(Self::ScriptRequest { code: body.ctnt })
        } else {
            Err(ProtocolError::UnknownKind(kind))
        }
    }
}

/// Outcome of a script evaluation, as reported back to the server.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptReply {
    /// Evaluation completed; `undefined` results are reported as null.
    Value(Value),
    /// Evaluation failed.
    Failure {
        mesg: String,
        name: Option<String>,
        caus: Option<Value>,
    },
}

impl ScriptReply {
    pub fn value(value: Value) -> Self {
        Self::Value(value)
    }

    pub fn failure(mesg: impl Into<String>, name: Option<String>, caus: Option<Value>) -> Self {
        Self::Failure {
            mesg: mesg.into(),
            name,
            caus,
        }
    }
}

/// A message sent to the server.
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    /// Connection handshake announcing the page this client shows.
    Handshake { path: String },
    /// Reply to a script request.
    Reply(ScriptReply),
}

impl Outbound {
    pub fn handshake(path: impl Into<String>) -> Self {
        Self::Handshake { path: path.into() }
    }

    /// Serialize to the wire format.
    ///
    /// Success replies reuse the request discriminator `2`; failures use
    /// the literal `2.1` with `name` and `caus` present even when null.
    pub fn to_json(&self) -> String {
        match self {
            Self::Handshake { path } => json!({ "path": path }).to_string(),
            Self::Reply(ScriptReply::Value(value)) => {
                json!({ "type": 2, "ctnt": value }).to_string()
            }
            Self::Reply(ScriptReply::Failure { mesg, name, caus }) => {
                json!({ "type": 2.1, "mesg": mesg, "name": name, "caus": caus }).to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::AttrValue;

    #[test]
    fn test_handshake_wire_format() {
        let msg = Outbound::handshake("/docs/setup/");
        assert_eq!(msg.to_json(), r#"{"path":"/docs/setup/"}"#);
    }

    #[test]
    fn test_reply_value_wire_format() {
        let msg = Outbound::Reply(ScriptReply::value(json!(2)));
        assert_eq!(msg.to_json(), r#"{"type":2,"ctnt":2}"#);

        let msg = Outbound::Reply(ScriptReply::value(json!("dark")));
        assert_eq!(msg.to_json(), r#"{"type":2,"ctnt":"dark"}"#);

        let msg = Outbound::Reply(ScriptReply::value(Value::Null));
        assert_eq!(msg.to_json(), r#"{"type":2,"ctnt":null}"#);
    }

    #[test]
    fn test_reply_failure_wire_format() {
        let msg = Outbound::Reply(ScriptReply::failure("boom", None, None));
        assert_eq!(
            msg.to_json(),
            r#"{"type":2.1,"mesg":"boom","name":null,"caus":null}"#
        );

        let msg = Outbound::Reply(ScriptReply::failure(
            "x is not defined",
            Some("ReferenceError".into()),
            None,
        ));
        assert_eq!(
            msg.to_json(),
            r#"{"type":2.1,"mesg":"x is not defined","name":"ReferenceError","caus":null}"#
        );
    }

    #[test]
    fn test_decode_markup_update() {
        let msg = Inbound::from_json(
            r#"{"type":1,"initial":true,"ctyp":"md","ctnt":"<h1>Hi</h1>",
                "meta":{"title":"Home","theme":"dark"},"requires":["/app.css"]}"#,
        )
        .unwrap();
        match msg {
            Inbound::Update {
                content,
                meta,
                requires,
            } => {
                assert_eq!(content, PageContent::Markup("<h1>Hi</h1>".into()));
                assert_eq!(meta.title.as_deref(), Some("Home"));
                assert_eq!(meta.theme.as_deref(), Some("dark"));
                assert_eq!(requires, vec!["/app.css"]);
            }
            _ => panic!("expected update"),
        }
    }

    #[test]
    fn test_decode_structured_update() {
        let msg = Inbound::from_json(
            r#"{"type":1,"initial":true,"ctyp":"py",
                "ctnt":{"tag":"p","attrs":{"id":"x"},"children":"hi"}}"#,
        )
        .unwrap();
        match msg {
            Inbound::Update { content, meta, requires } => {
                match content {
                    PageContent::Structured(ContentNode::Element(el)) => {
                        assert_eq!(el.tag, "p");
                        assert_eq!(el.attrs[0].1, AttrValue::String("x".into()));
                    }
                    other => panic!("expected element tree, got {other:?}"),
                }
                assert_eq!(meta, Metadata::default());
                assert!(requires.is_empty());
            }
            _ => panic!("expected update"),
        }
    }

    #[test]
    fn test_decode_structured_text_leaf() {
        // a bare string is a valid tree: one text leaf
        let msg =
            Inbound::from_json(r#"{"type":1,"initial":true,"ctyp":"py","ctnt":"plain"}"#).unwrap();
        match msg {
            Inbound::Update { content, .. } => {
                assert_eq!(content, PageContent::Structured(ContentNode::Text("plain".into())));
            }
            _ => panic!("expected update"),
        }
    }

    #[test]
    fn test_decode_script_request() {
        let msg = Inbound::from_json(r#"{"type":2,"ctnt":"return 1 + 1"}"#).unwrap();
        assert_eq!(
            msg,
            Inbound::ScriptRequest {
                code: "return 1 + 1".into()
            }
        );
    }

    #[test]
    fn test_reload_decided_before_content_is_read() {
        // initial: false routes to Reload even when the payload is garbage
        let msg = Inbound::from_json(
            r#"{"type":1,"initial":false,"ctyp":"nope","ctnt":{"bogus":[1]}}"#,
        )
        .unwrap();
        assert_eq!(msg, Inbound::Reload);

        let msg = Inbound::from_json(r#"{"type":1,"initial":false}"#).unwrap();
        assert_eq!(msg, Inbound::Reload);
    }

    #[test]
    fn test_decode_rejects_malformed_frames() {
        assert!(matches!(
            Inbound::from_json("not json"),
            Err(ProtocolError::Encoding(_))
        ));
        assert!(matches!(
            Inbound::from_json(r#"[1,2]"#),
            Err(ProtocolError::NotAnObject)
        ));
        assert!(matches!(
            Inbound::from_json(r#"{"ctnt":"x"}"#),
            Err(ProtocolError::MissingKind)
        ));
        assert!(matches!(
            Inbound::from_json(r#"{"type":"1","ctnt":"x"}"#),
            Err(ProtocolError::MissingKind)
        ));
        assert!(matches!(
            Inbound::from_json(r#"{"type":3,"ctnt":"x"}"#),
            Err(ProtocolError::UnknownKind(k)) if k == 3.0
        ));
        assert!(matches!(
            Inbound::from_json(r#"{"type":1,"ctyp":"md","ctnt":"x"}"#),
            Err(ProtocolError::MissingInitial)
        ));
        assert!(matches!(
            Inbound::from_json(r#"{"type":1,"initial":true,"ctyp":"tex","ctnt":"x"}"#),
            Err(ProtocolError::UnknownContentType(t)) if t == "tex"
        ));
        assert!(matches!(
            Inbound::from_json(r#"{"type":1,"initial":true,"ctyp":"md","ctnt":42}"#),
            Err(ProtocolError::MarkupNotString)
        ));
        // script request must carry string code
        assert!(matches!(
            Inbound::from_json(r#"{"type":2,"ctnt":42}"#),
            Err(ProtocolError::Encoding(_))
        ));
    }

    #[test]
    fn test_decode_accepts_integral_float_kind() {
        let msg = Inbound::from_json(r#"{"type":2.0,"ctnt":"return 0"}"#).unwrap();
        assert!(matches!(msg, Inbound::ScriptRequest { .. }));
    }
}
