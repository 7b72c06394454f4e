pub mod admin_routes;
pub mod application_routes;
pub mod chat;
pub mod directory_routes;
pub mod health;
pub mod job_routes;
pub mod message_routes;
pub mod post_routes;
pub mod user_routes;

use crate::error::{Error, Result};

/// What an uploaded file is allowed to be, per asset class.
#[derive(Debug, Clone, Copy)]
pub enum UploadKind {
    Document,
    Image,
    Video,
}

/// Rejects uploads whose extension does not fit the asset class, plus a
/// few cheap magic-byte checks for formats that are trivially spoofed.
pub fn ensure_allowed_upload(kind: UploadKind, filename: &str, data: &bytes::Bytes) -> Result<()> {
    let ext = std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_else(|| "bin".to_string());

    let allowed: &[&str] = match kind {
        UploadKind::Document => &["pdf", "doc", "docx", "ppt", "pptx", "txt", "rtf"],
        UploadKind::Image => &["jpg", "jpeg", "png", "webp", "gif"],
        UploadKind::Video => &["mp4", "webm", "mov"],
    };
    if !allowed.contains(&ext.as_str()) {
        return Err(Error::BadRequest(format!(
            "File type .{} is not allowed",
            ext
        )));
    }

    if ext == "pdf" && !data.starts_with(b"%PDF") {
        return Err(Error::BadRequest("Invalid PDF file content".into()));
    }
    if (ext == "jpg" || ext == "jpeg") && !data.starts_with(&[0xFF, 0xD8]) {
        return Err(Error::BadRequest("Invalid JPEG file content".into()));
    }
    if ext == "png" && !data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        return Err(Error::BadRequest("Invalid PNG file content".into()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_gate_per_kind() {
        let pdf = bytes::Bytes::from_static(b"%PDF-1.7 ...");
        assert!(ensure_allowed_upload(UploadKind::Document, "deck.pdf", &pdf).is_ok());
        assert!(ensure_allowed_upload(UploadKind::Image, "deck.pdf", &pdf).is_err());
        assert!(ensure_allowed_upload(UploadKind::Video, "clip.mp4", &pdf).is_ok());
    }

    #[test]
    fn spoofed_pdf_is_rejected() {
        let junk = bytes::Bytes::from_static(b"MZ\x90\x00");
        assert!(ensure_allowed_upload(UploadKind::Document, "not-really.pdf", &junk).is_err());
    }
}
