/// Convenience result type used across scrollscene.
pub type SceneResult<T> = Result<T, SceneError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Per-frame paths never surface these: they degrade locally. Errors are returned from
/// configuration loading, asset decoding and the bounded async setup helpers.
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// Invalid user-provided scene configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Unusable scroll or canvas geometry.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Media element faults (unsupported codec, load failure).
    #[error("media error: {0}")]
    Media(String),

    /// Image, SVG or shape data that could not be decoded or sampled.
    #[error("asset error: {0}")]
    Asset(String),

    /// A bounded operation ran past its deadline.
    #[error("timeout: {0}")]
    Timeout(String),

    /// A bounded operation was aborted by its owner.
    #[error("cancelled")]
    Cancelled,

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SceneError {
    /// Build a [`SceneError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SceneError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build a [`SceneError::Media`] value.
    pub fn media(msg: impl Into<String>) -> Self {
        Self::Media(msg.into())
    }

    /// Build a [`SceneError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`SceneError::Timeout`] value.
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Build a [`SceneError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for the two outcomes of [`crate::bounded`] that are not caused by the wrapped work.
    pub fn is_deadline(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Cancelled)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
