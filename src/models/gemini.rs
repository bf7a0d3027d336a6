//! Response bodies of the Gemini and Imagen REST endpoints.
//!
//! Every level is optional: blocked prompts come back with missing
//! candidates or parts rather than an error status.

use super::requests::{GeneratedImage, ResponsePart};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Option<Vec<Part>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, alias = "inline_data")]
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(alias = "mime_type")]
    pub mime_type: String,
    pub data: String,
}

impl GenerateContentResponse {
    fn first_candidate_parts(&self) -> &[Part] {
        self.candidates
            .as_deref()
            .and_then(|candidates| candidates.first())
            .and_then(|candidate| candidate.content.as_ref())
            .and_then(|content| content.parts.as_deref())
            .unwrap_or(&[])
    }

    /// Concatenated text of the first candidate, `None` when it has no text.
    pub fn text(&self) -> Option<String> {
        let texts: Vec<&str> = self
            .first_candidate_parts()
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }

    pub fn into_parts(self) -> Vec<ResponsePart> {
        let parts = self
            .candidates
            .and_then(|candidates| candidates.into_iter().next())
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts)
            .unwrap_or_default();

        parts
            .into_iter()
            .filter_map(|part| match (part.inline_data, part.text) {
                (Some(inline), _) => Some(ResponsePart::InlineData {
                    mime_type: inline.mime_type,
                    data: inline.data,
                }),
                (None, Some(text)) => Some(ResponsePart::Text(text)),
                (None, None) => None,
            })
            .collect()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub predictions: Option<Vec<Prediction>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    #[serde(default)]
    pub bytes_base64_encoded: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
}

impl PredictResponse {
    /// Predictions that actually carry image bytes; filtered ones are skipped.
    pub fn into_images(self, fallback_mime_type: &str) -> Vec<GeneratedImage> {
        self.predictions
            .unwrap_or_default()
            .into_iter()
            .filter_map(|prediction| {
                let data = prediction.bytes_base64_encoded.filter(|d| !d.is_empty())?;
                Some(GeneratedImage {
                    mime_type: prediction
                        .mime_type
                        .unwrap_or_else(|| fallback_mime_type.to_string()),
                    data,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_joins_parts_of_first_candidate() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "{\"title\":" }, { "text": "\"x\"}" }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }))
        .unwrap();
        assert_eq!(response.text().as_deref(), Some("{\"title\":\"x\"}"));
    }

    #[test]
    fn text_is_none_without_candidates() {
        let response: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(response.text(), None);
        assert!(response.into_parts().is_empty());
    }

    #[test]
    fn parts_keep_order_and_kind() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "Here is your helmet." },
                        { "inlineData": { "mimeType": "image/webp", "data": "UklGRg==" } }
                    ]
                }
            }]
        }))
        .unwrap();
        let parts = response.into_parts();
        assert_eq!(parts[0], ResponsePart::Text("Here is your helmet.".into()));
        assert_eq!(
            parts[1],
            ResponsePart::InlineData {
                mime_type: "image/webp".into(),
                data: "UklGRg==".into()
            }
        );
        assert!(parts[1].is_image());
    }

    #[test]
    fn predictions_without_bytes_are_dropped() {
        let response: PredictResponse = serde_json::from_value(json!({
            "predictions": [
                { "raiFilteredReason": "blocked" },
                { "bytesBase64Encoded": "/9j/4AAQ" }
            ]
        }))
        .unwrap();
        let images = response.into_images("image/jpeg");
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].mime_type, "image/jpeg");
        assert_eq!(images[0].data, "/9j/4AAQ");
    }
}
