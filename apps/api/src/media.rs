//! Upload validation. Images are sniffed by magic bytes before they can reach the
//! gateway; PDFs are turned into plain text for the text-only pipelines.

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

const PNG_SIGNATURE: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_SIGNATURE: &[u8] = &[0xFF, 0xD8, 0xFF];
const PDF_SIGNATURE: &[u8] = b"%PDF-";

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Uploaded file is empty")]
    Empty,

    #[error("Uploaded file is too large: {size} bytes (max {max})")]
    TooLarge { size: usize, max: usize },

    #[error("Unsupported image format. Please upload a PNG, JPEG, WEBP or HEIC image")]
    UnsupportedImage,

    #[error("Uploaded file is not a PDF document")]
    NotPdf,

    #[error("Could not read text from PDF: {0}")]
    UnreadablePdf(String),
}

/// An uploaded image whose format has been recognised.
#[derive(Debug, Clone)]
pub struct ImageBlob {
    pub mime_type: &'static str,
    pub bytes: Bytes,
}

impl ImageBlob {
    pub fn from_upload(bytes: Bytes, max_bytes: usize) -> Result<Self, MediaError> {
        check_size(&bytes, max_bytes)?;
        let mime_type = sniff_image_mime(&bytes).ok_or(MediaError::UnsupportedImage)?;
        debug!("Accepted {} upload ({} bytes)", mime_type, bytes.len());
        Ok(Self { mime_type, bytes })
    }
}

fn check_size(bytes: &[u8], max_bytes: usize) -> Result<(), MediaError> {
    if bytes.is_empty() {
        return Err(MediaError::Empty);
    }
    if bytes.len() > max_bytes {
        return Err(MediaError::TooLarge {
            size: bytes.len(),
            max: max_bytes,
        });
    }
    Ok(())
}

/// Returns the MIME type for the image formats the hosted model accepts.
fn sniff_image_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(PNG_SIGNATURE) {
        return Some("image/png");
    }
    if bytes.starts_with(JPEG_SIGNATURE) {
        return Some("image/jpeg");
    }
    if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        return Some("image/webp");
    }
    // ISO-BMFF: size(4) "ftyp" brand(4)
    if bytes.len() >= 12 && &bytes[4..8] == b"ftyp" {
        return match &bytes[8..12] {
            b"heic" | b"heix" | b"hevc" | b"hevx" => Some("image/heic"),
            b"mif1" | b"msf1" | b"heif" => Some("image/heif"),
            _ => None,
        };
    }
    None
}

/// Extracts the text layer of a PDF resume. Parsing is CPU-bound, so it runs on
/// the blocking pool.
pub async fn extract_pdf_text(bytes: Bytes, max_bytes: usize) -> Result<String, MediaError> {
    check_size(&bytes, max_bytes)?;
    if !bytes.starts_with(PDF_SIGNATURE) {
        return Err(MediaError::NotPdf);
    }

    let text = tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem(&bytes).map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| MediaError::UnreadablePdf(format!("extraction task failed: {e}")))?
    .map_err(MediaError::UnreadablePdf)?;

    Ok(text.trim().to_string())
}
