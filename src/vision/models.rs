// Vision models and types
// Author: kelexine (https://github.com/kelexine)

use bytes::Bytes;

/// Image formats the nutrition analysis accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    /// Get MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
        }
    }

    /// Try to detect format from MIME type
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        // Browsers may append parameters, e.g. "image/png; charset=binary"
        let essence = mime.split(';').next().unwrap_or("").trim();
        match essence.to_lowercase().as_str() {
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Some(ImageFormat::Jpeg),
            "image/png" => Some(ImageFormat::Png),
            _ => None,
        }
    }

    /// Detect format from the magic bytes at the start of the payload
    pub fn sniff(data: &[u8]) -> Option<Self> {
        if data.starts_with(b"\xFF\xD8\xFF") {
            Some(ImageFormat::Jpeg)
        } else if data.starts_with(b"\x89PNG\r\n\x1a\n") {
            Some(ImageFormat::Png)
        } else {
            None
        }
    }
}

/// Validation limits
pub const MAX_IMAGE_SIZE_BYTES: usize = 20 * 1024 * 1024; // 20MB (Gemini limit)

/// A file as handed over by the upload form, before validation.
#[derive(Debug, Clone)]
pub struct RawUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// A validated image: non-empty payload in a supported format.
///
/// Only [`crate::vision::accept_upload`] constructs one, so holding an
/// `UploadedImage` means both invariants hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    bytes: Bytes,
    format: ImageFormat,
}

impl UploadedImage {
    pub(crate) fn new(bytes: Bytes, format: ImageFormat) -> Self {
        debug_assert!(!bytes.is_empty());
        Self { bytes, format }
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn content_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
