use thiserror::Error;

pub type TemplateResult<T> = Result<T, TemplateError>;

#[derive(Error, Debug, Clone)]
pub enum TemplateError {
    #[error("Payload error: {0}")]
    PayloadError(String),

    #[error("Name, subject and content are required")]
    MissingFields,

    #[error("Validation failed: {error_count} error(s)")]
    ValidationFailed { error_count: usize },

    #[error("Read error: {0}")]
    ReadError(String),
}

impl From<serde_json::Error> for TemplateError {
    fn from(err: serde_json::Error) -> Self {
        TemplateError::PayloadError(err.to_string())
    }
}
