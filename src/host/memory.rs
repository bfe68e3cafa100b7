//! Arena-backed in-memory page.
//!
//! Nodes live in a flat `Vec` and refer to their children by index, so
//! handles stay `Copy` and the tree needs no reference counting. Slot 0
//! is always the mount point element.

use crate::protocol::AttrValue;

use super::markup::{escape, is_void_element};
use super::page::{HostError, HostPage, NodeId};

const ROOT: usize = 0;

#[derive(Debug)]
enum PageNode {
    Element {
        tag: String,
        properties: Vec<(String, AttrValue)>,
        children: Vec<usize>,
    },
    Text {
        text: String,
    },
    /// Pre-rendered markup stored verbatim; dumped without escaping.
    Markup {
        raw: String,
    },
}

#[derive(Debug)]
enum HeadEntry {
    Stylesheet { id: String, href: String },
    Module { id: String, src: String },
}

/// In-memory [`HostPage`] implementation.
///
/// Holds the document state a browser would: a mount point subtree, a
/// title and the head attachments. `to_html` dumps the whole document
/// for previews and assertions.
#[derive(Debug)]
pub struct MemoryPage {
    nodes: Vec<PageNode>,
    title: String,
    default_title: String,
    head: Vec<HeadEntry>,
}

impl MemoryPage {
    pub fn new(root_id: &str, title: &str) -> Self {
        Self {
            nodes: vec![PageNode::Element {
                tag: "div".to_string(),
                properties: vec![("id".to_string(), AttrValue::String(root_id.to_string()))],
                children: Vec::new(),
            }],
            title: title.to_string(),
            default_title: title.to_string(),
            head: Vec::new(),
        }
    }

    fn push(&mut self, node: PageNode) -> usize {
        let index = self.nodes.len();
        self.nodes.push(node);
        index
    }

    /// Dump the document as a single-line HTML string.
    pub fn to_html(&self) -> String {
        let mut out = String::from("<!DOCTYPE html><html><head><title>");
        out.push_str(&escape(&self.title));
        out.push_str("</title>");
        for entry in &self.head {
            match entry {
                HeadEntry::Stylesheet { id, href } => {
                    out.push_str(&format!(
                        r#"<link rel="stylesheet" id="{}" href="{}">"#,
                        escape(id),
                        escape(href)
                    ));
                }
                HeadEntry::Module { id, src } => {
                    out.push_str(&format!(
                        r#"<script type="module" id="{}" src="{}"></script>"#,
                        escape(id),
                        escape(src)
                    ));
                }
            }
        }
        out.push_str("</head><body>");
        self.render_node(ROOT, &mut out);
        out.push_str("</body></html>");
        out
    }

    fn render_node(&self, index: usize, out: &mut String) {
        match &self.nodes[index] {
            PageNode::Text { text } => out.push_str(&escape(text)),
            PageNode::Markup { raw } => out.push_str(raw),
            PageNode::Element {
                tag,
                properties,
                children,
            } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in properties {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape(&value.as_text()));
                    out.push('"');
                }
                if children.is_empty() && is_void_element(tag) {
                    out.push_str("/>");
                    return;
                }
                out.push('>');
                for &child in children {
                    self.render_node(child, out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}

/// Element names: ASCII letter first, then letters, digits or hyphens.
fn is_valid_tag(tag: &str) -> bool {
    let mut chars = tag.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

impl HostPage for MemoryPage {
    fn create_element(&mut self, tag: &str) -> Result<NodeId, HostError> {
        if !is_valid_tag(tag) {
            return Err(HostError::InvalidTag(tag.to_string()));
        }
        let index = self.push(PageNode::Element {
            tag: tag.to_string(),
            properties: Vec::new(),
            children: Vec::new(),
        });
        Ok(NodeId(index))
    }

    fn create_text(&mut self, text: &str) -> NodeId {
        let index = self.push(PageNode::Text {
            text: text.to_string(),
        });
        NodeId(index)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        match &mut self.nodes[parent.0] {
            PageNode::Element { children, .. } => children.push(child.0),
            _ => unreachable!("append target is always an element"),
        }
    }

    fn set_property(&mut self, node: NodeId, name: &str, value: &AttrValue) {
        match &mut self.nodes[node.0] {
            PageNode::Element { properties, .. } => {
                if let Some(slot) = properties.iter_mut().find(|(n, _)| n == name) {
                    slot.1 = value.clone();
                } else {
                    properties.push((name.to_string(), value.clone()));
                }
            }
            _ => unreachable!("property target is always an element"),
        }
    }

    fn root(&self) -> NodeId {
        NodeId(ROOT)
    }

    fn set_markup(&mut self, markup: &str) {
        let index = self.push(PageNode::Markup {
            raw: markup.to_string(),
        });
        let PageNode::Element { children, .. } = &mut self.nodes[ROOT] else {
            unreachable!("slot 0 is always the mount point element");
        };
        children.clear();
        children.push(index);
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn attach_stylesheet(&mut self, id: &str, href: &str) {
        for entry in &mut self.head {
            if let HeadEntry::Stylesheet { id: slot, href: h } = entry
                && slot == id
            {
                *h = href.to_string();
                return;
            }
        }
        self.head.push(HeadEntry::Stylesheet {
            id: id.to_string(),
            href: href.to_string(),
        });
    }

    fn attach_module(&mut self, id: &str, src: &str) {
        for entry in &mut self.head {
            if let HeadEntry::Module { id: slot, src: s } = entry
                && slot == id
            {
                *s = src.to_string();
                return;
            }
        }
        self.head.push(HeadEntry::Module {
            id: id.to_string(),
            src: src.to_string(),
        });
    }

    fn reset(&mut self) {
        self.nodes.truncate(1);
        let PageNode::Element { children, .. } = &mut self.nodes[ROOT] else {
            unreachable!("slot 0 is always the mount point element");
        };
        children.clear();
        self.title = self.default_title.clone();
        self.head.clear();
    }
}
