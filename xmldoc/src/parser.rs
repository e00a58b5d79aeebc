//! Prolog parser: validates the leading `<?xml version="X.Y"?>` declaration.
//!
//! This is a whitespace-delimited token scan specialized to the fixed prolog
//! grammar, not a general XML tokenizer. See
//! <https://www.w3.org/TR/2006/REC-xml11-20060816/#sec-prolog-dtd>.

use std::num::IntErrorKind;

use tracing::{debug, instrument, trace};

use crate::document::XmlVersion;
use crate::errors::{ParseError, ParseResult};

const XML_DECLARATION: &str = "<?xml";
const VERSION_PREFIX: &str = "version=\"";

/// Whitespace-delimited tokens of a wide-character buffer.
struct Tokens<'a> {
    rest: &'a [char],
}

impl<'a> Tokens<'a> {
    fn new(source: &'a [char]) -> Self {
        Self { rest: source }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a [char];

    fn next(&mut self) -> Option<Self::Item> {
        let Some(start) = self.rest.iter().position(|c| !c.is_whitespace()) else {
            self.rest = &[];
            return None;
        };
        let rest = &self.rest[start..];
        let end = rest
            .iter()
            .position(|c| c.is_whitespace())
            .unwrap_or(rest.len());
        let (token, tail) = rest.split_at(end);
        self.rest = tail;
        Some(token)
    }
}

fn starts_with(buf: &[char], prefix: &str) -> bool {
    let mut chars = buf.iter();
    prefix.chars().all(|p| chars.next() == Some(&p))
}

fn is(token: &[char], literal: &str) -> bool {
    token.len() == literal.chars().count() && starts_with(token, literal)
}

/// Parses the prolog at the start of `source` and returns the declared version.
#[instrument(level = "debug", skip(source), fields(len = source.len()))]
pub fn parse_prolog(source: &[char]) -> ParseResult<XmlVersion> {
    let mut tokens = Tokens::new(source);

    match tokens.next() {
        Some(token) if is(token, XML_DECLARATION) => {}
        other => {
            debug!(token = ?other.map(String::from_iter), "missing XML declaration");
            return Err(ParseError::syntax("Prolog: Expected XML declaration"));
        }
    }

    let declaration: Vec<char> = tokens
        .next()
        .unwrap_or_default()
        .iter()
        .copied()
        .filter(|&c| c != ' ')
        .collect();
    parse_version(&declaration)
}

/// Parses `version="X.Y"` (trailing characters after the closing quote are ignored).
fn parse_version(buf: &[char]) -> ParseResult<XmlVersion> {
    if !starts_with(buf, VERSION_PREFIX) {
        return Err(ParseError::syntax("Prolog: Expected version declaration"));
    }
    let body = &buf[VERSION_PREFIX.chars().count()..];
    let context = String::from_iter(body);

    let sep = body
        .iter()
        .position(|&c| c == '.')
        .ok_or_else(|| ParseError::syntax("Prolog: Expected symbol '.'"))?;
    let major = parse_number(&body[..sep], &context)?;

    let after_sep = &body[sep + 1..];
    let end_quote = after_sep
        .iter()
        .position(|&c| c == '"')
        .ok_or_else(|| ParseError::syntax("Prolog: Expected symbol '\"'"))?;
    let minor = parse_number(&after_sep[..end_quote], &context)?;

    trace!(major, minor, "parsed version");
    Ok(XmlVersion::new(major, minor))
}

fn parse_number(digits: &[char], context: &str) -> ParseResult<i32> {
    String::from_iter(digits)
        .parse::<i32>()
        .map_err(|e| match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                ParseError::NumberTooLarge(context.to_string())
            }
            _ => ParseError::syntax(format!(
                "Could not parse version number: '{context}'. Not a number."
            )),
        })
}
