/// Convenience result type used across parvis.
pub type ParvisResult<T> = Result<T, ParvisError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum ParvisError {
    /// Invalid user-provided configuration or property data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while executing a pipeline pass (filter or representation).
    #[error("pipeline error: {0}")]
    Pipeline(String),

    /// Errors while rendering, compositing or relaying images.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ParvisError {
    /// Build a [`ParvisError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ParvisError::Pipeline`] value.
    pub fn pipeline(msg: impl Into<String>) -> Self {
        Self::Pipeline(msg.into())
    }

    /// Build a [`ParvisError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
