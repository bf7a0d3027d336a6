use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Ways a structured-content payload can fail to be a [`Content`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentShapeError {
    #[error("payload is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("payload is not a JSON object")]
    NotAnObject,
    #[error("field '{0}' is missing, empty, or not text")]
    InvalidField(&'static str),
    #[error("field 'tags' is not a list")]
    TagsNotAList,
    #[error("tag #{0} is empty or not text")]
    InvalidTag(usize),
}

/// Title, description and tags for one generated 3D model concept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Content {
    title: String,
    description: String,
    tags: Vec<String>,
}

impl Content {
    /// Parses and checks the service's JSON text field by field.
    ///
    /// Nothing is coerced: a number where text is expected, an empty title or
    /// a `tags` value that is not a list all fail.
    pub fn from_json_text(text: &str) -> Result<Self, ContentShapeError> {
        let value: Value = serde_json::from_str(text.trim())
            .map_err(|e| ContentShapeError::InvalidJson(e.to_string()))?;
        let object = value.as_object().ok_or(ContentShapeError::NotAnObject)?;

        let title = required_text(object.get("title"), "title")?;
        let description = required_text(object.get("description"), "description")?;

        let raw_tags = object
            .get("tags")
            .and_then(Value::as_array)
            .ok_or(ContentShapeError::TagsNotAList)?;
        let tags = raw_tags
            .iter()
            .enumerate()
            .map(|(index, tag)| {
                tag.as_str()
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(String::from)
                    .ok_or(ContentShapeError::InvalidTag(index))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            title,
            description,
            tags,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

fn required_text(value: Option<&Value>, field: &'static str) -> Result<String, ContentShapeError> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(String::from)
        .ok_or(ContentShapeError::InvalidField(field))
}
