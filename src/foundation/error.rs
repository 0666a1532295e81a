/// Convenience result type used across Tifo.
pub type TifoResult<T> = Result<T, TifoError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum TifoError {
    /// Invalid user-provided content or options.
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed or inconsistent grid templates.
    #[error("template error: {0}")]
    Template(String),

    /// Lookup misses against the static layout/theme catalog.
    #[error("catalog error: {0}")]
    Catalog(String),

    /// Errors while painting or compositing layers.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when encoding rendered frames (PNG, data URLs).
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TifoError {
    /// Build a [`TifoError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TifoError::Template`] value.
    pub fn template(msg: impl Into<String>) -> Self {
        Self::Template(msg.into())
    }

    /// Build a [`TifoError::Catalog`] value.
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    /// Build a [`TifoError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`TifoError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
