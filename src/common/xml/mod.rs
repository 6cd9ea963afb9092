//! XML part parsing.
//!
//! Parts are parsed with quick-xml into a small element tree that keeps
//! resolved namespaces and document order, then queried with fixed
//! namespace maps. There is no schema knowledge at this layer.

pub mod escape;
pub mod namespaces;
pub mod path;
pub mod tree;

pub use escape::unescape_xml;
pub use path::{NamespaceMap, find_all, find_first};
pub use tree::{XmlDocument, XmlElement, XmlNode};
