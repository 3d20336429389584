//! Upload intake. Validates RFP documents and recordings and encodes them
//! for inline delivery to the model.

use base64::{engine::general_purpose::STANDARD, Engine};
use uuid::Uuid;

use crate::chat::models::UploadedFile;
use crate::errors::AppError;

/// Extension → MIME type for every accepted upload.
const ACCEPTED_TYPES: &[(&str, &str)] = &[
    ("pdf", "application/pdf"),
    ("doc", "application/msword"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("ppt", "application/vnd.ms-powerpoint"),
    (
        "pptx",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    ),
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("m4a", "audio/mp4"),
];

fn extension_of(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    Some(ext.to_ascii_lowercase())
}

/// MIME type for a file name, if its extension is accepted.
pub fn mime_for_name(name: &str) -> Option<&'static str> {
    let ext = extension_of(name)?;
    ACCEPTED_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}

/// Validates raw upload bytes and base64-encodes them.
///
/// The declared content type wins unless it is missing or the generic
/// `application/octet-stream`, in which case the extension decides.
pub fn accept_upload(
    name: &str,
    content_type: Option<&str>,
    bytes: &[u8],
    max_bytes: usize,
) -> Result<UploadedFile, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("uploaded file has no name".to_string()));
    }

    let mime_from_ext = mime_for_name(name).ok_or_else(|| {
        AppError::Validation(format!(
            "unsupported file type for '{name}' (accepted: PDF, DOC, DOCX, PPT, PPTX, MP3, WAV, M4A)"
        ))
    })?;

    if bytes.is_empty() {
        return Err(AppError::Validation(format!("'{name}' is empty")));
    }
    if bytes.len() > max_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "'{name}' is {} bytes; the limit is {max_bytes} bytes",
            bytes.len()
        )));
    }

    let mime_type = match content_type.map(str::trim) {
        Some(ct) if !ct.is_empty() && ct != "application/octet-stream" => ct.to_string(),
        _ => mime_from_ext.to_string(),
    };

    Ok(UploadedFile {
        id: Uuid::new_v4(),
        name: name.to_string(),
        mime_type,
        size: bytes.len(),
        data: STANDARD.encode(bytes),
    })
}

/// Accepts a browser-style data URL (`data:<mime>;base64,<payload>`).
///
/// Only the payload after the comma is kept; a bare base64 string is taken
/// as-is with the MIME type derived from the name.
pub fn accept_data_url(
    name: &str,
    data_url: &str,
    max_bytes: usize,
) -> Result<UploadedFile, AppError> {
    let (declared_mime, payload) = match data_url.split_once(',') {
        Some((header, payload)) => {
            let mime = header
                .strip_prefix("data:")
                .and_then(|h| h.split(';').next())
                .filter(|m| !m.is_empty());
            (mime, payload)
        }
        None => (None, data_url),
    };

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| AppError::Validation(format!("'{name}' is not valid base64: {e}")))?;

    accept_upload(name, declared_mime, &bytes, max_bytes)
}
