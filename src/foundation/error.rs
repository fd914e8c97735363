use crate::foundation::core::ElementId;

/// Convenience result type used across scrollmotion.
pub type MotionResult<T> = Result<T, MotionError>;

/// Top-level error taxonomy.
///
/// Only configuration problems are meant to reach callers. Capability errors are produced by
/// intersection backends and absorbed by the watcher, which falls back to "always visible".
#[derive(thiserror::Error, Debug)]
pub enum MotionError {
    /// A threshold, duration, section list or config value was rejected before first use.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The host cannot observe viewport intersections.
    #[error("capability unavailable: {0}")]
    CapabilityUnavailable(String),

    /// A runtime query named an element that was never mounted (or already unmounted).
    #[error("unknown element: {0}")]
    UnknownElement(ElementId),

    /// Errors when serializing or deserializing configs and page manifests.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MotionError {
    /// Build a [`MotionError::InvalidConfiguration`] value.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Build a [`MotionError::CapabilityUnavailable`] value.
    pub fn capability(msg: impl Into<String>) -> Self {
        Self::CapabilityUnavailable(msg.into())
    }

    /// Build a [`MotionError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
