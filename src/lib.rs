//! Conceptforge turns a short 3D model idea into a title, description, tags
//! and a concept image, and lets the image be refined with follow-up edits.
//!
//! ```no_run
//! use conceptforge::{ForgeConfig, GeminiClient, Orchestrator, Session, StylePreset};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ForgeConfig::from_env()?;
//! let session = Session::new(Orchestrator::new(GeminiClient::new(&config)?));
//! session.set_prompt("a glowing crystal sword");
//! session.select_style(StylePreset::Cyberpunk);
//! session.submit_generate().await;
//! println!("{:?}", session.snapshot().content);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod gemini;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod service;
pub mod session;

pub use config::ForgeConfig;
pub use error::{ClientError, ErrorKind, ForgeError, Result};
pub use gemini::{EditClient, GeminiClient, ImageClient, TextClient};
pub use models::{
    Content, ContentShapeError, GeneratedImage, Image, ImageDecodeError, ImageEditRequest,
    ImageGenerationRequest, ImageParts, ResponsePart, StructuredTextRequest, StylePreset,
};
pub use orchestrator::{build_image_prompt, Orchestrator};
pub use service::GenerationService;
pub use session::{OperationGuard, Session, SessionState, SubmitOutcome};
