/// Convenience result type used across tilecap.
pub type TilecapResult<T> = Result<T, TilecapError>;

/// Top-level error taxonomy used by capture APIs.
#[derive(thiserror::Error, Debug)]
pub enum TilecapError {
    /// Sizes, scales or view state that make a capture impossible before it starts.
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// The host view went away (or stopped answering) while a capture needed it.
    #[error("view unavailable: {0}")]
    ViewUnavailable(String),

    /// Errors raised while reading back or assembling tiles.
    #[error("capture error: {0}")]
    Capture(String),

    /// Errors while encoding or persisting the assembled image.
    #[error("output error: {0}")]
    Output(String),

    /// Invalid configuration values.
    #[error("config error: {0}")]
    Config(String),

    /// The capture was cancelled before it finished.
    #[error("capture cancelled")]
    Cancelled,

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TilecapError {
    /// Build a [`TilecapError::Precondition`] value.
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// Build a [`TilecapError::ViewUnavailable`] value.
    pub fn view_unavailable(msg: impl Into<String>) -> Self {
        Self::ViewUnavailable(msg.into())
    }

    /// Build a [`TilecapError::Capture`] value.
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture(msg.into())
    }

    /// Build a [`TilecapError::Output`] value.
    pub fn output(msg: impl Into<String>) -> Self {
        Self::Output(msg.into())
    }

    /// Build a [`TilecapError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
