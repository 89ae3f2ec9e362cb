use thiserror::Error;

pub type Result<T> = std::result::Result<T, OpenAiError>;

#[derive(Debug, Error)]
pub enum OpenAiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Response contained no completion text")]
    EmptyCompletion,
}

impl From<reqwest::Error> for OpenAiError {
    fn from(err: reqwest::Error) -> Self {
        OpenAiError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for OpenAiError {
    fn from(err: serde_json::Error) -> Self {
        OpenAiError::Parse(err.to_string())
    }
}
