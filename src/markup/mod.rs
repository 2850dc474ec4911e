// Markup loading
//
// This module turns a JMdict XML document into a generic element tree: tag
// names, direct text, attributes, ordered children and parent links.

pub mod entities;
pub mod loader;
pub mod tree;

pub use entities::EntityTable;
pub use loader::{load_path, load_url, parse_bytes, parse_str};
pub use tree::{MarkupNode, MarkupTree, NodeId, NodeRef};
