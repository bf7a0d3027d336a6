use super::Transport;
use crate::{
    error::ClientResult,
    models::{gemini::GenerateContentResponse, ImageEditRequest, ResponsePart},
};
use serde_json::{json, Value};

#[derive(Clone)]
pub struct EditClient {
    transport: Transport,
    model: String,
}

impl EditClient {
    pub(crate) fn new(transport: Transport, model: String) -> Self {
        Self { transport, model }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn build_request_body(request: &ImageEditRequest) -> Value {
        json!({
            "contents": [{
                "role": "user",
                "parts": [
                    {
                        "inlineData": {
                            "mimeType": request.media_type,
                            "data": request.payload
                        }
                    },
                    { "text": request.instruction }
                ]
            }],
            "generationConfig": {
                "responseModalities": ["IMAGE", "TEXT"]
            }
        })
    }

    pub async fn edit(&self, request: ImageEditRequest) -> ClientResult<Vec<ResponsePart>> {
        let url = self.transport.endpoint(&self.model, "generateContent");
        let body = Self::build_request_body(&request);

        log::info!("Editing image with model: {}", self.model);
        log::debug!(
            "Edit input: {} ({} base64 chars)",
            request.media_type,
            request.payload.len()
        );

        let response: GenerateContentResponse = self.transport.post_json(&url, &body).await?;
        Ok(response.into_parts())
    }
}
