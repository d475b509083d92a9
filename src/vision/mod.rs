//! Vision and image processing module.
//!
//! Every upload is decoded and re-encoded to JPEG before it is sent upstream,
//! whatever its source format. This gives Gemini a single, predictable
//! `inlineData` MIME type.
//!
//! # Submodules
//!
//! - `models`: Upload and normalized payload types.
//! - `normalize`: Decode + JPEG re-encode + base64.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod models;
pub mod normalize;

pub use models::{NormalizedImagePayload, UploadedImage, NORMALIZED_MIME_TYPE};
pub use normalize::normalize_image;
