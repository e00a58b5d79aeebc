//! Whole-file loading into wide-character buffers.

use std::path::Path;

use tracing::{debug, instrument};

use crate::charconv::{narrow_to_wide, WideString};
use crate::document::Document;
use crate::errors::{XmlError, XmlResult};

#[instrument(level = "debug")]
pub fn load_from_file(path: &Path) -> XmlResult<WideString> {
    let bytes = std::fs::read(path).map_err(|e| {
        XmlError::io(
            format!("Failed to open file at path: {}", path.display()),
            e,
        )
    })?;
    debug!(bytes = bytes.len(), "read source file");
    narrow_to_wide(&bytes)
}

/// Loads `path` and parses it as a document.
pub fn parse_file(path: &Path) -> XmlResult<Document> {
    let source = load_from_file(path)?;
    Ok(Document::parse(&source)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::XmlVersion;
    use tempfile::TempDir;

    #[test]
    fn given_existing_file_when_loading_then_returns_wide_contents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("doc.xml");
        std::fs::write(&path, "<?xml version=\"1.0\"?>\n<root/>").unwrap();

        let wide = load_from_file(&path).unwrap();
        assert_eq!(wide.len(), 29);
        assert_eq!(wide[0], '<');
    }

    #[test]
    fn given_missing_file_when_loading_then_io_error_names_path() {
        let err = load_from_file(Path::new("/nonexistent/doc.xml")).unwrap_err();
        assert!(matches!(err, XmlError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/doc.xml"));
    }

    #[test]
    fn given_file_with_prolog_when_parsing_file_then_version_set() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("doc.xml");
        std::fs::write(&path, "<?xml version=\"1.1\"?>").unwrap();

        let doc = parse_file(&path).unwrap();
        assert_eq!(doc.version(), Some(XmlVersion::new(1, 1)));
    }
}
