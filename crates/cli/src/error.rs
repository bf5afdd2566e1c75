use shared::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request failed with status {status}")]
    Status { status: u16, message: Option<String> },

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl ClientError {
    /// Text shown to the user: the server's own error verbatim when it sent
    /// one, the validation message for client-side checks, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Status {
                message: Some(message),
                ..
            } => message.clone(),
            ClientError::Invalid(err) => err.to_string(),
            _ => fallback.to_string(),
        }
    }
}
