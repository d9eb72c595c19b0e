//! Opaque, order-preserving cursors

use crate::error::{LabError, LabResult};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a cursor position counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorKind {
    /// Zero-based index into a materialized sequence
    Offset,
    /// Zero-based page number of a remote listing
    Page,
}

impl CursorKind {
    fn tag(self) -> &'static str {
        match self {
            CursorKind::Offset => "offset",
            CursorKind::Page => "page",
        }
    }
}

/// Opaque cursor handed to API clients
///
/// Encodes a kind and a position. Decoding checks the kind, so a cursor
/// issued by a local connection is rejected by a remote one and vice versa.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    /// Encode a position
    pub fn encode(kind: CursorKind, position: usize) -> Self {
        Self(BASE64.encode(format!("{}:{}", kind.tag(), position)))
    }

    /// Cursor for an item index in a local sequence
    pub fn offset(index: usize) -> Self {
        Self::encode(CursorKind::Offset, index)
    }

    /// Cursor for a remote page number
    pub fn page(page: usize) -> Self {
        Self::encode(CursorKind::Page, page)
    }

    /// Decode the position, requiring the cursor to be of `kind`
    pub fn decode(&self, kind: CursorKind) -> LabResult<usize> {
        let bytes = BASE64
            .decode(self.0.as_bytes())
            .map_err(|_| LabError::InvalidCursor(self.0.clone()))?;
        let text = String::from_utf8(bytes).map_err(|_| LabError::InvalidCursor(self.0.clone()))?;

        let (tag, position) = text
            .split_once(':')
            .ok_or_else(|| LabError::InvalidCursor(self.0.clone()))?;
        if tag != kind.tag() {
            return Err(LabError::InvalidCursor(format!(
                "{} is a {} cursor, expected a {} cursor",
                self.0,
                tag,
                kind.tag()
            )));
        }

        position
            .parse()
            .map_err(|_| LabError::InvalidCursor(self.0.clone()))
    }

    /// The encoded form
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Cursor {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Cursor {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_cursor_decodes_to_index() {
        let cursor = Cursor::offset(42);
        assert_eq!(cursor.decode(CursorKind::Offset).unwrap(), 42);
    }

    #[test]
    fn cursor_is_opaque_base64() {
        assert_eq!(Cursor::page(0).as_str(), "cGFnZTow");
    }

    #[test]
    fn kind_mismatch_is_rejected() {
        let err = Cursor::page(3).decode(CursorKind::Offset).unwrap_err();
        assert!(matches!(err, LabError::InvalidCursor(_)));
    }

    #[test]
    fn garbage_is_rejected() {
        for raw in ["not base64!", "MA==", "b2Zmc2V0OmFiYw=="] {
            let err = Cursor::from(raw).decode(CursorKind::Offset).unwrap_err();
            assert!(matches!(err, LabError::InvalidCursor(_)), "{}", raw);
        }
    }
}
