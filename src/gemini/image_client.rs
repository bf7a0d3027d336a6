use super::Transport;
use crate::{
    error::ClientResult,
    models::{gemini::PredictResponse, GeneratedImage, ImageGenerationRequest},
};
use serde_json::{json, Value};

#[derive(Clone)]
pub struct ImageClient {
    transport: Transport,
    model: String,
}

impl ImageClient {
    pub(crate) fn new(transport: Transport, model: String) -> Self {
        Self { transport, model }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn build_request_body(request: &ImageGenerationRequest) -> Value {
        json!({
            "instances": [{ "prompt": request.prompt }],
            "parameters": {
                "sampleCount": request.number_of_images,
                "aspectRatio": request.aspect_ratio,
                "outputOptions": { "mimeType": request.output_mime_type }
            }
        })
    }

    /// An empty vector means the service answered but produced nothing.
    pub async fn generate(
        &self,
        request: ImageGenerationRequest,
    ) -> ClientResult<Vec<GeneratedImage>> {
        let url = self.transport.endpoint(&self.model, "predict");
        let body = Self::build_request_body(&request);

        log::info!("Generating image with model: {}", self.model);

        let response: PredictResponse = self.transport.post_json(&url, &body).await?;
        let images = response.into_images(&request.output_mime_type);

        log::debug!("Image model returned {} image(s)", images.len());
        Ok(images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_requests_one_square_jpeg() {
        let request = ImageGenerationRequest::single_jpeg("concept art of a lantern");
        let body = ImageClient::build_request_body(&request);

        assert_eq!(body["instances"][0]["prompt"], "concept art of a lantern");
        assert_eq!(body["parameters"]["sampleCount"], 1);
        assert_eq!(body["parameters"]["aspectRatio"], "1:1");
        assert_eq!(body["parameters"]["outputOptions"]["mimeType"], "image/jpeg");
    }
}
