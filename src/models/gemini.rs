// Gemini generateContent type definitions
// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};

/// Gemini generate content request (public v1beta API format).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    /// Conversation turns. The relay always sends exactly one.
    pub contents: Vec<Content>,
}

/// A single content item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Individual part of content in a Gemini request/response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    /// Inline binary data (images).
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },

    /// Text content part.
    Text { text: String },
}

impl Part {
    /// Get text content if this is a Text part
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text { text } => Some(text),
            _ => None,
        }
    }
}

/// Inline image data for vision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineData {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub data: String, // base64 encoded
}
