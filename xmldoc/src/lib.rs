//! In-memory XML document model.
//!
//! A [`Document`] holds the version from the `<?xml version="X.Y"?>`
//! declaration and a [`Tree`] of [`Element`]s. Only the declaration is parsed;
//! the tree is built through [`Tree::insert`] and trimmed with [`Tree::erase`].
//!
//! ```ignore
//! let doc = xmldoc::Document::parse_str("<?xml version=\"1.1\"?>")?;
//! assert_eq!(doc.version(), Some(xmldoc::XmlVersion::new(1, 1)));
//! ```

pub mod charconv;
pub mod cli;
pub mod config;
pub mod document;
pub mod element;
pub mod errors;
pub mod exitcode;
pub mod index;
pub mod loader;
pub mod parser;
pub mod tree;
pub mod tree_display;
pub mod util;

pub use document::{Document, XmlVersion};
pub use element::{Element, Scalar, Value};
pub use errors::{ParseError, ParseResult, XmlError, XmlResult};
pub use index::{checked_at, checked_at_mut, Index};
pub use tree::{for_each, for_each_mut, NodeId, Tree, TreeNode};
pub use tree_display::TreeDisplay;
