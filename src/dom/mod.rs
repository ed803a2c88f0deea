//! In-memory XML tree.
//!
//! The whole input is parsed up front into an [`XmlDocument`]; the corpus
//! walker then navigates it by local element name and attribute predicates.

mod arena;
mod parser;

pub use arena::{Attribute, Children, Descendants, Node, NodeData, NodeId, XmlDocument};
pub use parser::{parse_bytes, parse_str};
