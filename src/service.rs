use crate::{
    error::ClientResult,
    models::{
        GeneratedImage, ImageEditRequest, ImageGenerationRequest, ResponsePart,
        StructuredTextRequest,
    },
};
use async_trait::async_trait;

/// The remote generation service as the orchestrator sees it.
///
/// Implementations only move bytes; checking that a response has the right
/// shape is the orchestrator's job.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Returns the raw JSON text produced for the request's schema.
    async fn generate_structured(&self, request: StructuredTextRequest) -> ClientResult<String>;

    /// Returns every image the service produced, possibly none.
    async fn generate_images(
        &self,
        request: ImageGenerationRequest,
    ) -> ClientResult<Vec<GeneratedImage>>;

    /// Returns the response parts in the order they were received.
    async fn edit_image(&self, request: ImageEditRequest) -> ClientResult<Vec<ResponsePart>>;
}
