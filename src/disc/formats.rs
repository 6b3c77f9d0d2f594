//! Blob container type definitions

use serde::Serialize;
use std::path::Path;

/// Container formats a [`BlobReader`](super::blob::BlobReader) can present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BlobType {
    /// Uncompressed 1:1 disc dump (.iso/.gcm)
    Plain,
    /// Disc image held entirely in memory
    Memory,
}

impl BlobType {
    /// Detect blob type from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "iso" | "gcm" => Some(Self::Plain),
            _ => None,
        }
    }

    /// Get the display name for this blob type
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Plain => "Plain disc image",
            Self::Memory => "In-memory image",
        }
    }
}

/// Get all supported file extensions for directory scans
pub fn supported_extensions() -> Vec<&'static str> {
    vec!["iso", "gcm"]
}
