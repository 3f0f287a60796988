/// Convenience result type used across polyfit.
pub type PolyfitResult<T> = Result<T, PolyfitError>;

/// Top-level error taxonomy used by evaluator APIs.
#[derive(thiserror::Error, Debug)]
pub enum PolyfitError {
    /// The reference image decoded to a pixel layout the normalizer cannot handle.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The reference image could not be opened or decoded at all.
    #[error("decode error: {0}")]
    Decode(String),

    /// Two canvases disagree on format, width, height or stride and cannot be diffed.
    #[error("incomparable canvases: {0}")]
    Incomparable(String),

    /// Persisting a canvas to disk failed.
    #[error("draw error: {0}")]
    Draw(String),

    /// Invalid caller-provided data (options, canvas geometry, dimensions).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing genomes and options.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PolyfitError {
    /// Build a [`PolyfitError::UnsupportedFormat`] value.
    pub fn unsupported_format(msg: impl Into<String>) -> Self {
        Self::UnsupportedFormat(msg.into())
    }

    /// Build a [`PolyfitError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`PolyfitError::Incomparable`] value.
    pub fn incomparable(msg: impl Into<String>) -> Self {
        Self::Incomparable(msg.into())
    }

    /// Build a [`PolyfitError::Draw`] value.
    pub fn draw(msg: impl Into<String>) -> Self {
        Self::Draw(msg.into())
    }

    /// Build a [`PolyfitError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PolyfitError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether this error is local to a single evaluation (the caller may penalize and move on)
    /// rather than fatal to evaluator construction.
    pub fn is_per_evaluation(&self) -> bool {
        matches!(self, Self::Incomparable(_) | Self::Draw(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
