use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),

    #[error("Error querying API. Error: {message} - Code: {code}")]
    Transport { code: String, message: String },

    #[error("Could not encode request parameters: {0}")]
    Encoding(String),
}

impl ApiError {
    pub(crate) fn transport(code: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Transport {
            code: code.into(),
            message: message.into(),
        }
    }
}
