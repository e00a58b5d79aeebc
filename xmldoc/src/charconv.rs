//! Conversion between narrow (byte) and wide (one `char` per code point) text.
//!
//! Wide to narrow is single-byte only: every code point must fit in one byte
//! (ASCII/Latin-1). This is not a general Unicode transcoder.

use crate::errors::{XmlError, XmlResult};

pub type WideString = Vec<char>;

/// Decodes UTF-8 bytes into wide characters.
pub fn narrow_to_wide(bytes: &[u8]) -> XmlResult<WideString> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        XmlError::Encoding(format!("invalid UTF-8 at byte {}", e.valid_up_to()))
    })?;
    Ok(to_wide(text))
}

/// Encodes wide characters one byte each.
pub fn wide_to_narrow(wide: &[char]) -> XmlResult<Vec<u8>> {
    wide.iter()
        .enumerate()
        .map(|(pos, &ch)| {
            u8::try_from(u32::from(ch)).map_err(|_| {
                XmlError::Encoding(format!(
                    "character U+{:04X} at position {pos} does not fit in a single byte",
                    u32::from(ch)
                ))
            })
        })
        .collect()
}

pub fn to_wide(text: &str) -> WideString {
    text.chars().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_ascii_bytes_when_widened_then_one_char_per_byte() {
        let wide = narrow_to_wide(b"<?xml").unwrap();
        assert_eq!(wide, vec!['<', '?', 'x', 'm', 'l']);
    }

    #[test]
    fn given_multibyte_utf8_when_widened_then_decodes_code_points() {
        let wide = narrow_to_wide("é€".as_bytes()).unwrap();
        assert_eq!(wide, vec!['é', '€']);
    }

    #[test]
    fn given_invalid_utf8_when_widened_then_encoding_error() {
        let err = narrow_to_wide(&[b'a', 0xff, b'b']).unwrap_err();
        assert!(matches!(err, XmlError::Encoding(_)));
        assert!(err.to_string().contains("byte 1"));
    }

    #[test]
    fn given_latin1_when_narrowed_then_single_bytes() {
        assert_eq!(wide_to_narrow(&['a', 'é']).unwrap(), vec![b'a', 0xe9]);
    }

    #[test]
    fn given_wide_code_point_when_narrowed_then_encoding_error() {
        let err = wide_to_narrow(&['a', '€']).unwrap_err();
        assert!(err.to_string().contains("U+20AC"));
    }
}
