//! Logo images embedded as data URIs

use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::BadgeError;

/// An image file encoded for inline inclusion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoImage {
    mime: &'static str,
    payload: String,
}

impl LogoImage {
    /// Read and encode an image file; the MIME type follows the extension
    pub fn load(path: &Path) -> Result<Self, BadgeError> {
        let bytes = std::fs::read(path).map_err(|e| BadgeError::resource(path, e))?;
        Ok(Self::from_bytes(&bytes, mime_for_path(path)))
    }

    pub fn from_bytes(bytes: &[u8], mime: &'static str) -> Self {
        Self {
            mime,
            payload: STANDARD.encode(bytes),
        }
    }

    pub fn mime(&self) -> &'static str {
        self.mime
    }

    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.payload)
    }
}

/// MIME type by file extension, PNG when unknown
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        _ => "image/png",
    }
}
