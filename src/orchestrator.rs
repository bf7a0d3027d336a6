use crate::{
    error::{ForgeError, Result},
    logger,
    models::{
        Content, Image, ImageEditRequest, ImageGenerationRequest, ResponsePart,
        StructuredTextRequest, StylePreset,
    },
    service::GenerationService,
};
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

pub const CONTENT_FAILURE_MESSAGE: &str = "Failed to generate content from the AI. Please try again.";
pub const IMAGE_FAILURE_MESSAGE: &str =
    "Failed to generate the concept image. The generation service might be unavailable.";
pub const EDIT_FAILURE_MESSAGE: &str = "Failed to edit the image. Please try again.";
pub const EMPTY_PROMPT_MESSAGE: &str = "Please enter a description for your 3D model.";
pub const EMPTY_INSTRUCTION_MESSAGE: &str = "Please enter an instruction to edit the image.";

const IMAGE_PROMPT_LEAD_IN: &str = "High-quality 3D concept art of ";
const IMAGE_PROMPT_SUFFIX: &str = "Cinematic lighting, hyper-detailed, trending on ArtStation.";

/// JSON schema the content model must answer with.
pub fn content_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": {
                "type": "STRING",
                "description": "A creative and fitting title for the 3D model."
            },
            "description": {
                "type": "STRING",
                "description": "A detailed, multi-paragraph description of the 3D model, covering its appearance, materials, potential history, and unique features. Should be at least 100 words."
            },
            "tags": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "An array of 5-10 relevant keywords or tags for this model, such as \"sci-fi\", \"weapon\", \"character\", \"armor\", \"low-poly\", etc."
            }
        },
        "required": ["title", "description", "tags"]
    })
}

/// Wraps the user's idea in the instruction sent to the content model.
pub fn content_prompt(idea: &str) -> String {
    format!(
        "Based on the following user idea, generate detailed content for a 3D model. User idea: \"{}\"",
        idea.trim()
    )
}

/// Assembles the image prompt from generated content and a style preset.
pub fn build_image_prompt(content: &Content, style: StylePreset) -> String {
    let mut prompt = format!(
        "{}{}. {}. ",
        IMAGE_PROMPT_LEAD_IN,
        content.title(),
        content.description()
    );
    if let Some(clause) = style.clause() {
        prompt.push_str(&format!("Art style: {}. ", clause));
    }
    prompt.push_str(IMAGE_PROMPT_SUFFIX);
    prompt
}

/// Sequences remote calls and turns their raw output into validated records.
///
/// Every failure is logged with its cause and returned as a short message.
/// Nothing is retried or cached between calls.
pub struct Orchestrator<S: GenerationService> {
    service: Arc<S>,
    /// Overrides the temperature the service was configured with.
    temperature: Option<f32>,
}

impl<S: GenerationService> Clone for Orchestrator<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            temperature: self.temperature,
        }
    }
}

impl<S: GenerationService> Orchestrator<S> {
    pub fn new(service: S) -> Self {
        Self::from_shared(Arc::new(service))
    }

    pub fn from_shared(service: Arc<S>) -> Self {
        Self {
            service,
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub async fn generate_content(&self, prompt: &str) -> Result<Content> {
        if prompt.trim().is_empty() {
            return Err(ForgeError::Validation(EMPTY_PROMPT_MESSAGE.to_string()));
        }

        let request = StructuredTextRequest {
            prompt: content_prompt(prompt),
            schema: content_schema(),
            temperature: self.temperature,
        };

        let text = self.service.generate_structured(request).await.map_err(|e| {
            log::error!("Error generating 3D model content: {}", e);
            ForgeError::Generation(CONTENT_FAILURE_MESSAGE.to_string())
        })?;

        Content::from_json_text(&text).map_err(|e| {
            log::error!("Invalid content structure received from API: {}", e);
            log::debug!("Rejected content payload: {}", text);
            ForgeError::Generation(CONTENT_FAILURE_MESSAGE.to_string())
        })
    }

    pub async fn generate_image(&self, prompt: &str) -> Result<Image> {
        let request = ImageGenerationRequest::single_jpeg(prompt);
        let images = self.service.generate_images(request).await.map_err(|e| {
            log::error!("Error generating concept image: {}", e);
            ForgeError::Generation(IMAGE_FAILURE_MESSAGE.to_string())
        })?;

        let first = images.into_iter().next().ok_or_else(|| {
            log::error!("Error generating concept image: no image was generated");
            ForgeError::Generation(IMAGE_FAILURE_MESSAGE.to_string())
        })?;

        Ok(Image::from_base64(&first.mime_type, &first.data))
    }

    pub async fn edit_image(&self, current: &Image, instruction: &str) -> Result<Image> {
        let instruction = instruction.trim();
        if instruction.is_empty() {
            return Err(ForgeError::Validation(EMPTY_INSTRUCTION_MESSAGE.to_string()));
        }

        let parts = current.decompose().map_err(|e| {
            log::error!("Current image cannot be sent for editing: {}", e);
            ForgeError::Edit(EDIT_FAILURE_MESSAGE.to_string())
        })?;

        let request = ImageEditRequest {
            media_type: parts.media_type.to_string(),
            payload: parts.payload.to_string(),
            instruction: instruction.to_string(),
        };

        let response = self.service.edit_image(request).await.map_err(|e| {
            log::error!("Error editing image: {}", e);
            ForgeError::Edit(EDIT_FAILURE_MESSAGE.to_string())
        })?;

        let mut edited = None;
        for part in response {
            if edited.is_some() || !part.is_image() {
                if let ResponsePart::Text(text) = part {
                    log::debug!("Edit commentary discarded: {}", text);
                }
                continue;
            }
            if let ResponsePart::InlineData { mime_type, data } = part {
                edited = Some(Image::from_base64(&mime_type, &data));
            }
        }

        edited.ok_or_else(|| {
            log::error!("Error editing image: response contained no image part");
            ForgeError::Edit(EDIT_FAILURE_MESSAGE.to_string())
        })
    }

    /// Content first, then the image built from it.
    ///
    /// The image call only happens once content succeeded; if it then fails
    /// the content is dropped with it.
    pub async fn generate(&self, prompt: &str, style: StylePreset) -> Result<(Content, Image)> {
        let request_id = Uuid::new_v4();
        let mut timer = logger::timer(format!("generate [req:{}]", request_id));
        log::info!("[req:{}] Generating content (style: {})", request_id, style);

        let result = self.generate_pair(prompt, style, request_id).await;
        match &result {
            Ok(_) => {
                timer.stop();
            }
            Err(e) => {
                timer.fail(&e.to_string());
            }
        }
        result
    }

    async fn generate_pair(
        &self,
        prompt: &str,
        style: StylePreset,
        request_id: Uuid,
    ) -> Result<(Content, Image)> {
        let content = self.generate_content(prompt).await?;
        log::info!("[req:{}] Content ready: {}", request_id, content.title());

        let image_prompt = build_image_prompt(&content, style);
        log::debug!("[req:{}] Image prompt: {}", request_id, image_prompt);
        let image = self.generate_image(&image_prompt).await?;

        Ok((content, image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ClientError, ClientResult};
    use crate::models::GeneratedImage;
    use async_trait::async_trait;
    use std::sync::Mutex;

    const CONTENT_JSON: &str = r#"{"title":"Aetherblade","description":"A sword grown from crystal","tags":["fantasy","weapon"]}"#;

    #[derive(Default)]
    struct Recorder {
        structured: Mutex<Vec<StructuredTextRequest>>,
        images: Mutex<Vec<ImageGenerationRequest>>,
        edits: Mutex<Vec<ImageEditRequest>>,
    }

    struct StubService {
        text: Option<String>,
        images: Vec<GeneratedImage>,
        edit_parts: Option<Vec<ResponsePart>>,
        calls: Recorder,
    }

    impl StubService {
        fn new(text: Option<&str>) -> Self {
            Self {
                text: text.map(String::from),
                images: vec![GeneratedImage {
                    mime_type: "image/jpeg".into(),
                    data: "/9j/4AAQ".into(),
                }],
                edit_parts: None,
                calls: Recorder::default(),
            }
        }
    }

    #[async_trait]
    impl GenerationService for StubService {
        async fn generate_structured(
            &self,
            request: StructuredTextRequest,
        ) -> ClientResult<String> {
            self.calls.structured.lock().unwrap().push(request);
            self.text
                .clone()
                .ok_or_else(|| ClientError::Request("connection refused".into()))
        }

        async fn generate_images(
            &self,
            request: ImageGenerationRequest,
        ) -> ClientResult<Vec<GeneratedImage>> {
            self.calls.images.lock().unwrap().push(request);
            Ok(self.images.clone())
        }

        async fn edit_image(&self, request: ImageEditRequest) -> ClientResult<Vec<ResponsePart>> {
            self.calls.edits.lock().unwrap().push(request);
            self.edit_parts.clone().ok_or(ClientError::Api {
                status: 500,
                body: "internal".into(),
            })
        }
    }

    fn content() -> Content {
        Content::from_json_text(CONTENT_JSON).unwrap()
    }

    #[test]
    fn image_prompt_includes_style_clause_only_when_chosen() {
        let content = content();

        let styled = build_image_prompt(&content, StylePreset::Cyberpunk);
        assert!(styled.starts_with("High-quality 3D concept art of Aetherblade. "));
        assert!(styled.contains("A sword grown from crystal"));
        assert!(styled.contains("cyberpunk, neon lighting, futuristic"));
        assert!(styled.ends_with("Cinematic lighting, hyper-detailed, trending on ArtStation."));

        let plain = build_image_prompt(&content, StylePreset::Default);
        assert_eq!(
            plain,
            "High-quality 3D concept art of Aetherblade. A sword grown from crystal. \
             Cinematic lighting, hyper-detailed, trending on ArtStation."
        );
        assert!(!plain.contains("Art style"));
    }

    #[test]
    fn content_prompt_quotes_the_idea() {
        assert_eq!(
            content_prompt("  a glowing crystal sword "),
            "Based on the following user idea, generate detailed content for a 3D model. \
             User idea: \"a glowing crystal sword\""
        );
        assert_eq!(content_schema()["required"], json!(["title", "description", "tags"]));
    }

    #[tokio::test]
    async fn blank_prompt_never_reaches_the_service() {
        let orchestrator = Orchestrator::new(StubService::new(Some(CONTENT_JSON)));
        let err = orchestrator.generate_content(" \t\n").await.unwrap_err();
        assert_eq!(err, ForgeError::Validation(EMPTY_PROMPT_MESSAGE.into()));
        assert!(orchestrator.service().calls.structured.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn content_request_uses_schema_and_service_temperature() {
        let orchestrator = Orchestrator::new(StubService::new(Some(CONTENT_JSON)));
        let content = orchestrator.generate_content("a crystal sword").await.unwrap();
        assert_eq!(content.title(), "Aetherblade");

        let calls = orchestrator.service().calls.structured.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].prompt.contains("\"a crystal sword\""));
        assert_eq!(calls[0].schema, content_schema());
        assert_eq!(calls[0].temperature, None);
    }

    #[tokio::test]
    async fn explicit_temperature_is_forwarded() {
        let orchestrator =
            Orchestrator::new(StubService::new(Some(CONTENT_JSON))).with_temperature(0.2);
        orchestrator.generate_content("a crystal sword").await.unwrap();

        let calls = orchestrator.service().calls.structured.lock().unwrap();
        assert_eq!(calls[0].temperature, Some(0.2));
    }

    #[tokio::test]
    async fn generated_image_keeps_reported_media_type() {
        let mut service = StubService::new(Some(CONTENT_JSON));
        service.images = vec![GeneratedImage {
            mime_type: "image/png".into(),
            data: "iVBORw0KGgo=".into(),
        }];
        let orchestrator = Orchestrator::new(service);

        let image = orchestrator.generate_image("prompt").await.unwrap();
        assert_eq!(image.data_uri(), "data:image/png;base64,iVBORw0KGgo=");
    }

    #[tokio::test]
    async fn malformed_content_fails_and_skips_image() {
        let orchestrator = Orchestrator::new(StubService::new(Some(
            r#"{"title":"t","description":"d","tags":"oops"}"#,
        )));
        let err = orchestrator
            .generate("a crystal sword", StylePreset::Default)
            .await
            .unwrap_err();
        assert_eq!(err, ForgeError::Generation(CONTENT_FAILURE_MESSAGE.into()));
        assert!(orchestrator.service().calls.images.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn remote_content_failure_maps_to_generation_error() {
        let orchestrator = Orchestrator::new(StubService::new(None));
        let err = orchestrator.generate_content("anything").await.unwrap_err();
        assert_eq!(err, ForgeError::Generation(CONTENT_FAILURE_MESSAGE.into()));
    }

    #[tokio::test]
    async fn zero_images_is_a_generation_error() {
        let mut service = StubService::new(Some(CONTENT_JSON));
        service.images.clear();
        let orchestrator = Orchestrator::new(service);

        let err = orchestrator.generate_image("prompt").await.unwrap_err();
        assert_eq!(err, ForgeError::Generation(IMAGE_FAILURE_MESSAGE.into()));
    }

    #[tokio::test]
    async fn generate_requests_one_jpeg_and_wraps_it() {
        let orchestrator = Orchestrator::new(StubService::new(Some(CONTENT_JSON)));
        let (content, image) = orchestrator
            .generate("a crystal sword", StylePreset::LowPoly)
            .await
            .unwrap();

        assert_eq!(content.title(), "Aetherblade");
        assert_eq!(image.data_uri(), "data:image/jpeg;base64,/9j/4AAQ");

        let calls = orchestrator.service().calls.images.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].number_of_images, 1);
        assert_eq!(calls[0].output_mime_type, "image/jpeg");
        assert_eq!(calls[0].aspect_ratio, "1:1");
        assert!(calls[0].prompt.contains("low poly, vibrant colors"));
    }

    #[tokio::test]
    async fn edit_sends_decomposed_image_and_takes_first_image_part() {
        let mut service = StubService::new(Some(CONTENT_JSON));
        service.edit_parts = Some(vec![
            ResponsePart::Text("Added a helmet.".into()),
            ResponsePart::InlineData {
                mime_type: "image/webp".into(),
                data: "UklGRg==".into(),
            },
            ResponsePart::InlineData {
                mime_type: "image/png".into(),
                data: "iVBORw0KGgo=".into(),
            },
        ]);
        let orchestrator = Orchestrator::new(service);
        let current = Image::from_base64("image/png", "iVBORw0KGgo=");

        let edited = orchestrator.edit_image(&current, "add a helmet").await.unwrap();
        assert_eq!(edited.data_uri(), "data:image/webp;base64,UklGRg==");

        let edits = orchestrator.service().calls.edits.lock().unwrap();
        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].media_type, "image/png");
        assert_eq!(edits[0].payload, "iVBORw0KGgo=");
        assert_eq!(edits[0].instruction, "add a helmet");
    }

    #[tokio::test]
    async fn edit_failures_map_to_edit_error() {
        let orchestrator = Orchestrator::new(StubService::new(Some(CONTENT_JSON)));
        let current = Image::from_base64("image/png", "iVBORw0KGgo=");

        // remote failure
        let err = orchestrator.edit_image(&current, "add a helmet").await.unwrap_err();
        assert_eq!(err, ForgeError::Edit(EDIT_FAILURE_MESSAGE.into()));

        // undecomposable image never reaches the service
        let broken = Image::from_data_uri("not-a-data-uri");
        let err = orchestrator.edit_image(&broken, "add a helmet").await.unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Edit);
        assert_eq!(orchestrator.service().calls.edits.lock().unwrap().len(), 1);

        let err = orchestrator.edit_image(&current, "   ").await.unwrap_err();
        assert_eq!(err, ForgeError::Validation(EMPTY_INSTRUCTION_MESSAGE.into()));
    }

    #[tokio::test]
    async fn edit_skips_inline_parts_that_are_not_images() {
        let mut service = StubService::new(Some(CONTENT_JSON));
        service.edit_parts = Some(vec![
            ResponsePart::InlineData {
                mime_type: "application/octet-stream".into(),
                data: "AAAA".into(),
            },
            ResponsePart::InlineData {
                mime_type: "image/jpeg".into(),
                data: "/9j/4AAQ".into(),
            },
        ]);
        let orchestrator = Orchestrator::new(service);
        let current = Image::from_base64("image/png", "iVBORw0KGgo=");

        let edited = orchestrator.edit_image(&current, "add a helmet").await.unwrap();
        assert_eq!(edited.data_uri(), "data:image/jpeg;base64,/9j/4AAQ");
    }

    #[tokio::test]
    async fn edit_without_image_part_fails() {
        let mut service = StubService::new(Some(CONTENT_JSON));
        service.edit_parts = Some(vec![ResponsePart::Text("I can't do that.".into())]);
        let orchestrator = Orchestrator::new(service);
        let current = Image::from_base64("image/png", "iVBORw0KGgo=");

        let err = orchestrator.edit_image(&current, "add a helmet").await.unwrap_err();
        assert_eq!(err, ForgeError::Edit(EDIT_FAILURE_MESSAGE.into()));
    }
}
