//! Error taxonomy shared by the tree, the element model and the parser.

use thiserror::Error;

/// Failures raised while parsing a document.
///
/// `Syntax` is the grammar-violation specialization: callers that only care
/// whether parsing failed match on `ParseError` as a whole.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Syntax error: {0}")]
    Syntax(String),

    #[error("Could not parse version number: '{0}'. Version number too large")]
    NumberTooLarge(String),
}

impl ParseError {
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax(message.into())
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, ParseError::Syntax(_))
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Error, Debug)]
pub enum XmlError {
    /// Structural misuse: a node without a parent, or a handle to an erased node.
    #[error("null reference: {0}")]
    NullReference(String),

    #[error("index {index} out of range for length {len}")]
    OutOfRange { index: usize, len: usize },

    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("key not found: {0}")]
    KeyNotFound(String),

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl XmlError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn null_reference(message: impl Into<String>) -> Self {
        Self::NullReference(message.into())
    }
}

pub type XmlResult<T> = Result<T, XmlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_syntax_error_when_converted_then_stays_a_parse_error() {
        let err: XmlError = ParseError::syntax("Prolog: Expected XML declaration").into();
        match err {
            XmlError::Parse(e) => assert!(e.is_syntax()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn given_overflow_when_displayed_then_mentions_too_large() {
        let err = ParseError::NumberTooLarge("99999999999999999999.0\"?>".into());
        assert!(!err.is_syntax());
        assert!(err.to_string().contains("Version number too large"));
    }
}
