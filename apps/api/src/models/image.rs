//! Uploaded images are stored inline as data URLs so a saved document is
//! self-contained.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MIB: usize = 1024 * 1024;

/// An encoded image (`data:<mime>;base64,<payload>`). Opaque to everything
/// except the renderer, which only ever writes it into an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Photo,
    Logo,
}

impl ImageKind {
    pub fn max_bytes(&self) -> usize {
        match self {
            ImageKind::Photo => 5 * MIB,
            ImageKind::Logo => 2 * MIB,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ImageKind::Photo => "photo",
            ImageKind::Logo => "logo",
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ImageError {
    #[error("No file was provided")]
    Empty,

    #[error("Unsupported file type '{0}': please select a valid image file")]
    UnsupportedType(String),

    #[error("{kind} is {actual} bytes; it should be less than {limit_mb}MB")]
    TooLarge {
        kind: &'static str,
        actual: usize,
        limit_mb: usize,
    },
}

/// Validates an upload and encodes it. Nothing is mutated on failure.
pub fn encode_upload(kind: ImageKind, content_type: &str, data: &[u8]) -> Result<ImageRef, ImageError> {
    if data.is_empty() {
        return Err(ImageError::Empty);
    }
    let mime = content_type.trim().to_ascii_lowercase();
    if !mime.starts_with("image/") {
        return Err(ImageError::UnsupportedType(content_type.to_string()));
    }
    if data.len() > kind.max_bytes() {
        return Err(ImageError::TooLarge {
            kind: kind.label(),
            actual: data.len(),
            limit_mb: kind.max_bytes() / MIB,
        });
    }

    Ok(ImageRef(format!("data:{};base64,{}", mime, BASE64.encode(data))))
}
