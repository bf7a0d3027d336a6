use serde::Serialize;
use serde_json::Value;

/// A text prompt whose answer must be JSON matching `schema`.
#[derive(Debug, Clone, Serialize)]
pub struct StructuredTextRequest {
    pub prompt: String,
    pub schema: Value,
    /// Falls back to the text client's configured temperature when unset.
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageGenerationRequest {
    pub prompt: String,
    pub number_of_images: u32,
    pub output_mime_type: String,
    pub aspect_ratio: String,
}

impl ImageGenerationRequest {
    /// One square JPEG, the only shape the concept flow asks for.
    pub fn single_jpeg(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            number_of_images: 1,
            output_mime_type: "image/jpeg".to_string(),
            aspect_ratio: "1:1".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub mime_type: String,
    /// Base64 encoded
    pub data: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageEditRequest {
    pub media_type: String,
    pub payload: String,
    pub instruction: String,
}

/// One part of a multimodal response, in the order the service sent it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponsePart {
    Text(String),
    InlineData { mime_type: String, data: String },
}

impl ResponsePart {
    pub fn is_image(&self) -> bool {
        matches!(self, ResponsePart::InlineData { mime_type, .. } if mime_type.starts_with("image/"))
    }
}
