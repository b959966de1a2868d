//! Wire types for the Gemini `generateContent` endpoint.

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

/// A generateContent request body.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// One conversational turn.
#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

impl Content {
    /// A single-turn content from a list of parts.
    pub fn from_parts(parts: Vec<Part>) -> Self {
        Self { parts }
    }
}

/// A content part: plain text or inline binary data.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

impl Part {
    /// A text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// An inline image/binary part. Bytes are base64-encoded here so callers
    /// never deal with the encoding.
    pub fn inline_data(mime_type: impl Into<String>, data: &[u8]) -> Self {
        Self::InlineData {
            inline_data: InlineData {
                mime_type: mime_type.into(),
                data: general_purpose::STANDARD.encode(data),
            },
        }
    }
}

/// Base64-encoded inline payload.
#[derive(Debug, Clone, Serialize)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// Generation tuning options.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,

    /// e.g. "application/json" to request JSON-mode output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
}

/// A generateContent response body.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: CandidateContent,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidatePart {
    #[serde(default)]
    pub text: String,
}

impl GenerateContentResponse {
    /// Concatenate the text of the first candidate's parts.
    pub fn first_text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        if candidate.content.parts.is_empty() {
            return None;
        }
        Some(
            candidate
                .content
                .parts
                .iter()
                .map(|p| p.text.as_str())
                .collect(),
        )
    }
}
