//! Structured tree rendering.
//!
//! Converts a [`ContentNode`] description into detached host nodes,
//! recursing on the node variant. Tag validity is the host's call; the
//! renderer only decides what happens to the surrounding tree when a
//! node is rejected.

use crate::host::{HostError, HostPage, NodeId};
use crate::protocol::ContentNode;

/// Render a content tree into a detached host node.
///
/// - text leaf: a text node
/// - sequence: a container element, children rendered in order
/// - tagged node: an element, child content rendered first, then
///   attributes assigned in document order (last write wins)
///
/// A rejected tag fails only the node that carries it: at every
/// recursion point the failed subtree is dropped with a debug note and
/// its siblings survive. The error surfaces to the caller only when the
/// top-level node itself fails.
pub fn render(page: &mut impl HostPage, node: &ContentNode) -> Result<NodeId, HostError> {
    match node {
        ContentNode::Text(text) => Ok(page.create_text(text)),

        ContentNode::Sequence(items) => {
            let container = page.create_element("div")?;
            for item in items {
                match render(page, item) {
                    Ok(child) => page.append_child(container, child),
                    Err(e) => crate::debug!("page"; "dropped subtree: {e}"),
                }
            }
            Ok(container)
        }

        ContentNode::Element(el) => {
            let element = page.create_element(&el.tag)?;
            match render(page, &el.children) {
                Ok(content) => page.append_child(element, content),
                Err(e) => crate::debug!("page"; "dropped content of <{}>: {e}", el.tag),
            }
            for (name, value) in &el.attrs {
                page.set_property(element, name, value);
            }
            Ok(element)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryPage;

    fn mount(page: &mut MemoryPage, json: &str) -> Result<(), HostError> {
        let node: ContentNode = serde_json::from_str(json).unwrap();
        let rendered = render(page, &node)?;
        page.append_child(page.root(), rendered);
        Ok(())
    }

    #[test]
    fn test_text_leaf() {
        let mut page = MemoryPage::new("root", "t");
        mount(&mut page, r#""hello""#).unwrap();
        assert!(page.to_html().contains(r#"<div id="root">hello</div>"#));
    }

    #[test]
    fn test_sequence_preserves_order() {
        let mut page = MemoryPage::new("root", "t");
        mount(&mut page, r#"["one", "two", "three"]"#).unwrap();
        assert!(page.to_html().contains("<div>onetwothree</div>"));
    }

    #[test]
    fn test_element_children_rendered_then_attrs_applied() {
        let mut page = MemoryPage::new("root", "t");
        mount(
            &mut page,
            r#"{"tag":"a","attrs":{"href":"/x","id":"link"},"children":"go"}"#,
        )
        .unwrap();
        assert!(page.to_html().contains(r#"<a href="/x" id="link">go</a>"#));
    }

    #[test]
    fn test_duplicate_attr_last_write_wins() {
        let mut page = MemoryPage::new("root", "t");
        mount(
            &mut page,
            r#"{"tag":"p","attrs":{"class":"a","class":"b"},"children":""}"#,
        )
        .unwrap();
        let html = page.to_html();
        assert!(html.contains(r#"<p class="b">"#));
        assert!(!html.contains(r#"class="a""#));
    }

    #[test]
    fn test_invalid_tag_fails_top_level() {
        let mut page = MemoryPage::new("root", "t");
        assert!(mount(&mut page, r#"{"tag":"9bad","children":"x"}"#).is_err());
    }

    #[test]
    fn test_invalid_entry_dropped_from_sequence() {
        let mut page = MemoryPage::new("root", "t");
        mount(
            &mut page,
            r#"["ok", {"tag":"not a tag","children":"gone"}, "also ok"]"#,
        )
        .unwrap();
        let html = page.to_html();
        assert!(html.contains("<div>okalso ok</div>"));
        assert!(!html.contains("gone"));
    }

    #[test]
    fn test_invalid_child_keeps_parent_element() {
        let mut page = MemoryPage::new("root", "t");
        mount(
            &mut page,
            r#"{"tag":"section","attrs":{"id":"s"},"children":{"tag":"&bad","children":"x"}}"#,
        )
        .unwrap();
        let html = page.to_html();
        assert!(html.contains(r#"<section id="s"></section>"#));
        assert!(!html.contains("bad"));
    }

    #[test]
    fn test_nested_structure() {
        let mut page = MemoryPage::new("root", "t");
        mount(
            &mut page,
            r#"{"tag":"ul","children":[
                {"tag":"li","children":"one"},
                {"tag":"li","children":["two ", {"tag":"b","children":"bold"}]}
            ]}"#,
        )
        .unwrap();
        let html = page.to_html();
        assert!(html.contains("<li>one</li>"));
        assert!(html.contains("<li><div>two <b>bold</b></div></li>"));
    }
}
