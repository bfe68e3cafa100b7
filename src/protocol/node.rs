//! Structured content tree.
//!
//! The `py` content type delivers a recursive tree description instead of
//! pre-rendered markup. A node is one of:
//!
//! - a leaf text value: `"hello"`
//! - an ordered sequence: `[<node>, ...]`
//! - a tagged element: `{"tag": "div", "attrs": {...}, "children": <node>}`
//!
//! Attribute values are kept as typed values, not attribute strings, and
//! their document order is preserved so duplicate names resolve
//! last-write-wins when applied to the host.

use serde::{Deserialize, Serialize};

/// A typed attribute value.
///
/// Handler slots (`on*` names carrying code) are lifted into `Behavior`
/// during decode so the host binding can install them instead of
/// assigning a plain string. On the wire all variants are untagged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    /// Handler source attached to an `on*` property. Never parsed from
    /// the wire directly; produced by [`AttrValue::classify`].
    Behavior(String),
}

impl AttrValue {
    /// Attribute names that designate handler slots.
    fn is_handler_name(name: &str) -> bool {
        name.starts_with("on") && name.len() > 2
    }

    /// Lift string values on handler-named attributes into `Behavior`.
    pub fn classify(name: &str, value: Self) -> Self {
        match value {
            Self::String(code) if Self::is_handler_name(name) => Self::Behavior(code),
            other => other,
        }
    }

    /// Text rendering of the value (for HTML dumps and logs).
    pub fn as_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => n.to_string(),
            Self::String(s) | Self::Behavior(s) => s.clone(),
        }
    }
}

/// A tagged element node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementNode {
    /// Element name; validity is decided by the host environment.
    pub tag: String,

    /// Attributes in document order (duplicates preserved, last wins).
    #[serde(default, with = "ordered_attrs")]
    pub attrs: Vec<(String, AttrValue)>,

    /// Child content; a missing field means empty text.
    #[serde(default)]
    pub children: Box<ContentNode>,
}

/// Recursive structured content description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentNode {
    /// Leaf text value.
    Text(String),
    /// Ordered sequence of nodes.
    Sequence(Vec<ContentNode>),
    /// Tagged element with attributes and child content.
    Element(ElementNode),
}

impl Default for ContentNode {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl ContentNode {
    /// Count text and element nodes in the tree (for dispatch logging).
    /// Sequences are transparent; they only group their items.
    pub fn node_count(&self) -> usize {
        match self {
            Self::Text(_) => 1,
            Self::Sequence(items) => items.iter().map(Self::node_count).sum(),
            Self::Element(el) => 1 + el.children.node_count(),
        }
    }
}

/// Attribute map (de)serialization that keeps document order.
///
/// A plain `HashMap` would lose both ordering and duplicate entries;
/// the map is streamed entry by entry into a `Vec` instead.
mod ordered_attrs {
    use super::AttrValue;
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S>(attrs: &[(String, AttrValue)], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(attrs.len()))?;
        for (name, value) in attrs {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<(String, AttrValue)>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AttrVisitor;

        impl<'de> Visitor<'de> for AttrVisitor {
            type Value = Vec<(String, AttrValue)>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of attribute names to values")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut attrs = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, value)) = access.next_entry::<String, AttrValue>()? {
                    let value = AttrValue::classify(&name, value);
                    attrs.push((name, value));
                }
                Ok(attrs)
            }
        }

        deserializer.deserialize_map(AttrVisitor)
    }
}
