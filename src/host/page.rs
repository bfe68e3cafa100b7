//! Host page abstraction.

use thiserror::Error;

use crate::protocol::AttrValue;

/// Handle to a node owned by a host page.
///
/// Handles are only meaningful on the page that issued them, and become
/// invalid after [`HostPage::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// Errors raised by host page operations.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("invalid element tag `{0}`")]
    InvalidTag(String),
}

/// The document surface that rendered content lands on.
///
/// Gathers the handful of operations the update pipeline needs so the
/// renderer, resource loader and theme switch stay independent of the
/// concrete page representation.
pub trait HostPage {
    /// Create a detached element. Fails when the tag is not a valid
    /// element name; the caller decides what to do with the subtree.
    fn create_element(&mut self, tag: &str) -> Result<NodeId, HostError>;

    /// Create a detached text node.
    fn create_text(&mut self, text: &str) -> NodeId;

    /// Append `child` as the last child of `parent`.
    fn append_child(&mut self, parent: NodeId, child: NodeId);

    /// Assign a property on a node. Assignment semantics: repeated
    /// writes to the same name overwrite, last write wins.
    fn set_property(&mut self, node: NodeId, name: &str, value: &AttrValue);

    /// The mount point all delivered content lands under.
    fn root(&self) -> NodeId;

    /// Replace the mount point's content with pre-rendered markup,
    /// taken verbatim. Nothing is parsed or validated here.
    fn set_markup(&mut self, markup: &str);

    /// Replace the document title.
    fn set_title(&mut self, title: &str);

    /// Current document title.
    fn title(&self) -> &str;

    /// Attach or update a stylesheet link in the document head.
    /// An existing entry with the same id has its href replaced;
    /// otherwise a new entry is appended.
    fn attach_stylesheet(&mut self, id: &str, href: &str);

    /// Attach or update a module script in the document head, keyed by
    /// id like [`HostPage::attach_stylesheet`].
    fn attach_module(&mut self, id: &str, src: &str);

    /// Restore the pristine state: empty mount point, default title,
    /// nothing attached to the head.
    fn reset(&mut self);
}
