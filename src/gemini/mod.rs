pub mod edit_client;
pub mod image_client;
pub mod text_client;

use crate::{
    config::ForgeConfig,
    error::{ClientError, ClientResult, ForgeError, Result},
    models::{
        GeneratedImage, ImageEditRequest, ImageGenerationRequest, ResponsePart,
        StructuredTextRequest,
    },
    service::GenerationService,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use edit_client::EditClient;
pub use image_client::ImageClient;
pub use text_client::TextClient;

const ERROR_BODY_LIMIT: usize = 200;

/// Authenticated JSON-over-HTTPS access to the Gemini REST API.
#[derive(Clone)]
pub(crate) struct Transport {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl Transport {
    fn new(config: &ForgeConfig) -> Result<Self> {
        let api_key = config.api_key()?.to_string();

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ForgeError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub(crate) fn endpoint(&self, model: &str, method: &str) -> String {
        let model = model.trim();
        let model_path = if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{}", model)
        };
        format!("{}/{}:{}", self.base_url, model_path, method)
    }

    pub(crate) async fn post_json<T: DeserializeOwned>(
        &self,
        url: &str,
        body: &Value,
    ) -> ClientResult<T> {
        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                body: truncate(&body, ERROR_BODY_LIMIT),
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ClientError::Response(e.to_string()))
    }
}

fn truncate(value: &str, limit: usize) -> String {
    if value.chars().count() <= limit {
        return value.to_string();
    }
    let truncated: String = value.chars().take(limit).collect();
    format!("{}... (truncated)", truncated)
}

/// Gemini-backed [`GenerationService`] bundling the three endpoint clients.
#[derive(Clone)]
pub struct GeminiClient {
    text_client: TextClient,
    image_client: ImageClient,
    edit_client: EditClient,
}

impl GeminiClient {
    /// Fails with [`ForgeError::Config`] when the credential is missing.
    pub fn new(config: &ForgeConfig) -> Result<Self> {
        let transport = Transport::new(config)?;

        log::debug!("Gemini client configured: {:?}", config);

        Ok(Self {
            text_client: TextClient::new(
                transport.clone(),
                config.text_model.clone(),
                config.temperature,
            ),
            image_client: ImageClient::new(transport.clone(), config.image_model.clone()),
            edit_client: EditClient::new(transport, config.edit_model.clone()),
        })
    }

    pub fn text(&self) -> &TextClient {
        &self.text_client
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }

    pub fn edit(&self) -> &EditClient {
        &self.edit_client
    }

    /// `(model id, name, purpose)` for the models the defaults point at.
    pub fn supported_models() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            ("gemini-2.5-flash", "Gemini 2.5 Flash", "structured text"),
            ("imagen-4.0-generate-001", "Imagen 4", "image synthesis"),
            (
                "gemini-2.5-flash-image-preview",
                "Gemini 2.5 Flash Image",
                "image editing",
            ),
        ]
    }
}

#[async_trait]
impl GenerationService for GeminiClient {
    async fn generate_structured(&self, request: StructuredTextRequest) -> ClientResult<String> {
        self.text_client.generate(request).await
    }

    async fn generate_images(
        &self,
        request: ImageGenerationRequest,
    ) -> ClientResult<Vec<GeneratedImage>> {
        self.image_client.generate(request).await
    }

    async fn edit_image(&self, request: ImageEditRequest) -> ClientResult<Vec<ResponsePart>> {
        self.edit_client.edit(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_requires_a_key() {
        let err = GeminiClient::new(&ForgeConfig::new()).err().unwrap();
        assert!(matches!(err, ForgeError::Config(_)));
        assert!(GeminiClient::new(&ForgeConfig::new().with_api_key("k")).is_ok());
    }

    #[test]
    fn endpoint_accepts_bare_and_prefixed_models() {
        let config = ForgeConfig::new()
            .with_api_key("k")
            .with_base_url("http://localhost:9000/v1beta/");
        let transport = Transport::new(&config).unwrap();
        assert_eq!(
            transport.endpoint("gemini-2.5-flash", "generateContent"),
            "http://localhost:9000/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(
            transport.endpoint("models/imagen-4.0-generate-001", "predict"),
            "http://localhost:9000/v1beta/models/imagen-4.0-generate-001:predict"
        );
    }

    #[test]
    fn long_error_bodies_are_truncated() {
        let body = "x".repeat(500);
        let truncated = truncate(&body, ERROR_BODY_LIMIT);
        assert!(truncated.starts_with(&"x".repeat(200)));
        assert!(truncated.ends_with("... (truncated)"));
        assert_eq!(truncate("short", ERROR_BODY_LIMIT), "short");
    }
}
