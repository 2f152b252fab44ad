//! XML tree, lookup helpers and serializer.

mod tree;
mod utils;
mod writer;

pub use tree::{Element, Node, XmlDocument};
pub use utils::{
    ensure_child, find_by_path, find_child, find_children, find_children_mut, get_text,
};
pub use writer::{to_xml_string, write_document, INDENT_WIDTH};
