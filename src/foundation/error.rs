/// Convenience result type used across ringmotion.
pub type RingResult<T> = Result<T, RingError>;

/// Top-level error taxonomy for the fallible edges of the crate.
///
/// The chart core itself does not fail: out-of-range lookups render nothing and malformed
/// numbers flow through to geometry. Errors only arise while loading chart descriptions,
/// rasterizing scenes, or doing IO.
#[derive(thiserror::Error, Debug)]
pub enum RingError {
    /// Invalid user-provided chart description.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid animation parameters (frame rates, durations).
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors while turning a scene into pixels.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RingError {
    /// Build a [`RingError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RingError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`RingError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`RingError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for RingError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
