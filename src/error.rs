use thiserror::Error;

/// Errors surfaced by the recipe pipeline.
#[derive(Debug, Error)]
pub enum RecipeError {
    /// Network failure, timeout, non-success status or an unreadable
    /// envelope from the model endpoint.
    #[error("Model request failed: {0}")]
    Transport(String),

    /// Model output that decoded but did not match the recipe schema.
    #[error("Malformed model response at {path}: {message}")]
    MalformedResponse { path: String, message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for RecipeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RecipeError::Transport(format!("request timed out: {}", err))
        } else {
            RecipeError::Transport(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, RecipeError>;
