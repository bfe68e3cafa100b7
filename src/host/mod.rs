//! Document host.
//!
//! [`HostPage`] is the seam between protocol handling and whatever
//! actually displays the page. [`MemoryPage`] is the built-in
//! implementation, an arena-backed document with an HTML dump.

mod markup;
mod memory;
mod page;

pub use memory::MemoryPage;
pub use page::{HostError, HostPage, NodeId};
