// Upload intake: validate a user-supplied image before any network work
// Author: kelexine (https://github.com/kelexine)

use super::models::{ImageFormat, RawUpload, UploadedImage, MAX_IMAGE_SIZE_BYTES};
use crate::error::{AdvisorError, Result};
use tracing::debug;

/// Validate an upload with the default size limit.
pub fn accept_upload(raw: Option<RawUpload>) -> Result<UploadedImage> {
    accept_upload_with_limit(raw, MAX_IMAGE_SIZE_BYTES)
}

/// Validate an upload, rejecting payloads larger than `max_bytes`.
///
/// Checks run in order: presence, format, size. Nothing here touches the
/// network, so a failed check means no inference call is attempted.
pub fn accept_upload_with_limit(raw: Option<RawUpload>, max_bytes: usize) -> Result<UploadedImage> {
    let raw = raw.ok_or(AdvisorError::NoFileProvided)?;

    // An empty selection carries no image
    if raw.bytes.is_empty() {
        return Err(AdvisorError::NoFileProvided);
    }

    let format = resolve_format(raw.content_type.as_deref(), &raw.bytes)?;

    if raw.bytes.len() > max_bytes {
        return Err(AdvisorError::ImageTooLarge {
            size: raw.bytes.len(),
            max: max_bytes,
        });
    }

    debug!(
        "Accepted upload {:?}: {} bytes, {}",
        raw.file_name.as_deref().unwrap_or("<unnamed>"),
        raw.bytes.len(),
        format.mime_type()
    );

    Ok(UploadedImage::new(raw.bytes, format))
}

/// Use the declared content type when there is a meaningful one, otherwise
/// sniff the payload.
fn resolve_format(declared: Option<&str>, data: &[u8]) -> Result<ImageFormat> {
    match declared.map(str::trim).filter(|mt| !mt.is_empty()) {
        Some(mt) if mt.eq_ignore_ascii_case("application/octet-stream") => ImageFormat::sniff(data)
            .ok_or_else(|| AdvisorError::UnsupportedContentType(mt.to_string())),
        Some(mt) => ImageFormat::from_mime_type(mt)
            .ok_or_else(|| AdvisorError::UnsupportedContentType(mt.to_string())),
        None => ImageFormat::sniff(data).ok_or_else(|| {
            AdvisorError::UnsupportedContentType("unknown (undetectable format)".to_string())
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
    const JPEG_HEADER: &[u8] = b"\xFF\xD8\xFF\xE0\0\x10JFIF\0";

    fn upload(content_type: Option<&str>, data: &'static [u8]) -> Option<RawUpload> {
        Some(RawUpload {
            file_name: Some("meal".to_string()),
            content_type: content_type.map(str::to_string),
            bytes: Bytes::from_static(data),
        })
    }

    #[test]
    fn test_accept_valid_png() {
        let image = accept_upload(upload(Some("image/png"), PNG_HEADER)).unwrap();
        assert_eq!(image.content_type(), "image/png");
        assert_eq!(&image.bytes()[..], PNG_HEADER);
    }

    #[test]
    fn test_jpg_alias_is_jpeg() {
        let image = accept_upload(upload(Some("IMAGE/JPG"), JPEG_HEADER)).unwrap();
        assert_eq!(image.format(), ImageFormat::Jpeg);
        assert_eq!(image.content_type(), "image/jpeg");
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(accept_upload(None), Err(AdvisorError::NoFileProvided)));
    }

    #[test]
    fn test_empty_file_counts_as_missing() {
        let result = accept_upload(upload(Some("image/png"), b""));
        assert!(matches!(result, Err(AdvisorError::NoFileProvided)));
    }

    #[test]
    fn test_pdf_rejected() {
        let result = accept_upload(upload(Some("application/pdf"), b"%PDF-1.7"));
        match result {
            Err(AdvisorError::UnsupportedContentType(mt)) => assert_eq!(mt, "application/pdf"),
            other => panic!("expected UnsupportedContentType, got {:?}", other),
        }
    }

    #[test]
    fn test_declared_type_wins_over_bytes() {
        // Declared webp is rejected even though the bytes look like PNG
        let result = accept_upload(upload(Some("image/webp"), PNG_HEADER));
        assert!(matches!(result, Err(AdvisorError::UnsupportedContentType(_))));
    }

    #[test]
    fn test_sniff_when_type_missing() {
        let image = accept_upload(upload(None, JPEG_HEADER)).unwrap();
        assert_eq!(image.format(), ImageFormat::Jpeg);

        let image = accept_upload(upload(Some("application/octet-stream"), PNG_HEADER)).unwrap();
        assert_eq!(image.format(), ImageFormat::Png);

        let result = accept_upload(upload(Some(""), b"GIF89a......"));
        assert!(matches!(result, Err(AdvisorError::UnsupportedContentType(_))));
    }

    #[test]
    fn test_size_limit() {
        let result = accept_upload_with_limit(upload(Some("image/png"), PNG_HEADER), 8);
        match result {
            Err(AdvisorError::ImageTooLarge { size, max }) => {
                assert_eq!(size, PNG_HEADER.len());
                assert_eq!(max, 8);
            }
            other => panic!("expected ImageTooLarge, got {:?}", other),
        }
        assert!(accept_upload_with_limit(upload(Some("image/png"), PNG_HEADER), PNG_HEADER.len()).is_ok());
    }
}
