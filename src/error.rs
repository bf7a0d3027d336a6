use thiserror::Error;

/// User-facing failures surfaced by the orchestrator and the session.
///
/// `Display` is the short message shown to the user; the underlying cause is
/// only ever written to the diagnostic log.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForgeError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Generation(String),
    #[error("{0}")]
    Edit(String),
}

impl ForgeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ForgeError::Config(_) => ErrorKind::Config,
            ForgeError::Validation(_) => ErrorKind::Validation,
            ForgeError::Generation(_) => ErrorKind::Generation,
            ForgeError::Edit(_) => ErrorKind::Edit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Validation,
    Generation,
    Edit,
}

/// Failures of a single call against the generation service.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request error: {0}")]
    Request(String),
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Response error: {0}")]
    Response(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Response(err.to_string())
        } else {
            ClientError::Request(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ForgeError>;
pub type ClientResult<T> = std::result::Result<T, ClientError>;
