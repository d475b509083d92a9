// JPEG normalization of uploaded images
// Author: kelexine (https://github.com/kelexine)

use super::models::{NormalizedImagePayload, UploadedImage};
use crate::error::Result;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use tracing::debug;

/// Decode any supported image and re-encode it as base64 JPEG.
///
/// Lossy by design of the upstream contract: alpha is dropped, metadata is
/// discarded and only the first frame of an animation survives.
pub fn normalize_image(upload: &UploadedImage, quality: u8) -> Result<NormalizedImagePayload> {
    let decoded = image::load_from_memory(&upload.bytes)?;
    let (width, height) = (decoded.width(), decoded.height());

    // JPEG has no alpha channel
    let rgb = decoded.into_rgb8();

    let mut jpeg = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut jpeg, quality);
        encoder.encode_image(&rgb)?;
    }

    debug!(
        "Normalized {}x{} image: {} bytes in, {} bytes JPEG",
        width,
        height,
        upload.bytes.len(),
        jpeg.len()
    );

    Ok(NormalizedImagePayload {
        data: base64::engine::general_purpose::STANDARD.encode(&jpeg),
        jpeg_len: jpeg.len(),
        width,
        height,
    })
}
