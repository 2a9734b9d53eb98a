use thiserror::Error;

/// Fetch failures, surfaced as values on the result rather than unwound
/// through the view layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("server responded with status {status}")]
    Status { status: u16, body: String },

    #[error("malformed response payload: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}
