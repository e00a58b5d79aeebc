//! Parsed XML document: declared version plus the element tree.

use std::fmt;

use tracing::{info, instrument};

use crate::charconv::to_wide;
use crate::element::Element;
use crate::errors::ParseResult;
use crate::parser::parse_prolog;
use crate::tree::Tree;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct XmlVersion {
    pub major: i32,
    pub minor: i32,
}

impl XmlVersion {
    pub const fn new(major: i32, minor: i32) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for XmlVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// An XML document.
///
/// Only the prolog is parsed; the tree holds a default root element and is
/// otherwise populated through [`Document::tree_mut`].
#[derive(Debug, Clone, Default)]
pub struct Document {
    version: Option<XmlVersion>,
    tree: Tree<Element>,
}

impl Document {
    /// Parses a document from wide-character source.
    ///
    /// Every document must start with a prolog; a malformed one aborts the
    /// whole parse.
    #[instrument(level = "debug", skip(source))]
    pub fn parse(source: &[char]) -> ParseResult<Self> {
        let version = parse_prolog(source)?;
        info!(%version, "parsed XML declaration");
        Ok(Self {
            version: Some(version),
            tree: Tree::default(),
        })
    }

    pub fn parse_str(source: &str) -> ParseResult<Self> {
        Self::parse(&to_wide(source))
    }

    /// Declared version; None until a prolog has been parsed.
    pub fn version(&self) -> Option<XmlVersion> {
        self.version
    }

    pub fn tree(&self) -> &Tree<Element> {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut Tree<Element> {
        &mut self.tree
    }
}
