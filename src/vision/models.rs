// Vision models and types
// Author: kelexine (https://github.com/kelexine)

use crate::models::gemini::InlineData;
use bytes::Bytes;

/// MIME type of every image the relay sends upstream.
pub const NORMALIZED_MIME_TYPE: &str = "image/jpeg";

/// An image file taken from the `image` multipart field.
///
/// Owned by a single request and dropped once the upstream call completes.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub bytes: Bytes,
    /// Content type declared by the client. Informational only; the actual
    /// format is sniffed from the bytes.
    pub content_type: Option<String>,
    pub file_name: Option<String>,
}

impl UploadedImage {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: None,
            file_name: None,
        }
    }

    /// Format sniffed from magic bytes, as a MIME type
    pub fn detected_mime_type(&self) -> Option<&'static str> {
        image::guess_format(&self.bytes)
            .ok()
            .map(|f| f.to_mime_type())
    }
}

/// JPEG re-encoding of an [`UploadedImage`], base64 encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedImagePayload {
    /// Standard base64 (padded) of the JPEG bytes.
    pub data: String,
    /// Size of the JPEG before base64 encoding.
    pub jpeg_len: usize,
    pub width: u32,
    pub height: u32,
}

impl NormalizedImagePayload {
    pub fn mime_type(&self) -> &'static str {
        NORMALIZED_MIME_TYPE
    }
}

impl From<NormalizedImagePayload> for InlineData {
    fn from(payload: NormalizedImagePayload) -> Self {
        InlineData {
            mime_type: NORMALIZED_MIME_TYPE.to_string(),
            data: payload.data,
        }
    }
}
