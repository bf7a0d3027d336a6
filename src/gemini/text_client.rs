use super::Transport;
use crate::{
    error::{ClientError, ClientResult},
    models::{gemini::GenerateContentResponse, StructuredTextRequest},
};
use serde_json::{json, Value};

#[derive(Clone)]
pub struct TextClient {
    transport: Transport,
    model: String,
    temperature: f32,
}

impl TextClient {
    pub(crate) fn new(transport: Transport, model: String, temperature: f32) -> Self {
        Self {
            transport,
            model,
            temperature,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn build_request_body(&self, request: &StructuredTextRequest) -> Value {
        json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.prompt }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": request.schema,
                "temperature": request.temperature.unwrap_or(self.temperature)
            }
        })
    }

    /// Returns the raw JSON text; the caller decides whether it fits the schema.
    pub async fn generate(&self, request: StructuredTextRequest) -> ClientResult<String> {
        let url = self.transport.endpoint(&self.model, "generateContent");
        let body = self.build_request_body(&request);

        log::info!("Invoking text model: {}", self.model);
        log::debug!("Structured prompt: {} chars", request.prompt.chars().count());

        let response: GenerateContentResponse = self.transport.post_json(&url, &body).await?;

        response
            .text()
            .ok_or_else(|| ClientError::Response("Response contained no text".into()))
    }
}
