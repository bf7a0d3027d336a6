use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use thiserror::Error;

const DATA_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageDecodeError {
    #[error("image is not a data URI")]
    NotDataUri,
    #[error("image data URI is not base64 encoded")]
    NotBase64Encoded,
    #[error("'{0}' is not an image media type")]
    NotAnImage(String),
    #[error("image payload is empty")]
    EmptyPayload,
    #[error("image payload is not valid base64: {0}")]
    InvalidPayload(String),
}

/// A displayable image, held as a `data:<media type>;base64,<payload>` URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Image {
    data_uri: String,
}

/// Borrowed view of an [`Image`] split into media type and base64 payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageParts<'a> {
    pub media_type: &'a str,
    pub payload: &'a str,
}

impl Image {
    pub fn from_base64(media_type: &str, payload: &str) -> Self {
        Self {
            data_uri: format!("{}{}{}{}", DATA_PREFIX, media_type, BASE64_MARKER, payload),
        }
    }

    /// Wraps an existing data URI as-is; it is only checked by [`Image::decompose`].
    pub fn from_data_uri(data_uri: impl Into<String>) -> Self {
        Self {
            data_uri: data_uri.into(),
        }
    }

    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }

    pub fn decompose(&self) -> Result<ImageParts<'_>, ImageDecodeError> {
        let rest = self
            .data_uri
            .strip_prefix(DATA_PREFIX)
            .ok_or(ImageDecodeError::NotDataUri)?;
        let (media_type, payload) = rest
            .split_once(BASE64_MARKER)
            .ok_or(ImageDecodeError::NotBase64Encoded)?;

        if !media_type.starts_with("image/") || media_type.len() == "image/".len() {
            return Err(ImageDecodeError::NotAnImage(media_type.to_string()));
        }
        if payload.is_empty() {
            return Err(ImageDecodeError::EmptyPayload);
        }
        STANDARD
            .decode(payload)
            .map_err(|e| ImageDecodeError::InvalidPayload(e.to_string()))?;

        Ok(ImageParts {
            media_type,
            payload,
        })
    }

    pub fn media_type(&self) -> Option<&str> {
        self.decompose().ok().map(|parts| parts.media_type)
    }

    pub fn bytes(&self) -> Result<Vec<u8>, ImageDecodeError> {
        let parts = self.decompose()?;
        STANDARD
            .decode(parts.payload)
            .map_err(|e| ImageDecodeError::InvalidPayload(e.to_string()))
    }

    pub fn file_extension(&self) -> &'static str {
        match self.media_type() {
            Some("image/png") => "png",
            Some("image/webp") => "webp",
            Some("image/gif") => "gif",
            _ => "jpg",
        }
    }
}
