use std::path::PathBuf;

/// Convenience result type used across Robohash.
pub type RobohashResult<T> = Result<T, RobohashError>;

/// Top-level error taxonomy used by the selection engine and compositor.
///
/// Construction-time variants (`InsufficientEntropy`, `InsufficientVariants`) abort startup.
/// Everything else is returned to the caller of a single build request.
#[derive(thiserror::Error, Debug)]
pub enum RobohashError {
    /// A part set does not offer enough distinct combinations.
    #[error("insufficient parts for set '{set}': {bits:.1} bits of entropy (need 12)")]
    InsufficientEntropy {
        /// Name of the rejected set.
        set: String,
        /// Combined entropy of its choice groups.
        bits: f64,
    },

    /// A color-variant set has fewer than two variants.
    #[error("expected multiple color variants for set '{set}', found {found}")]
    InsufficientVariants {
        /// Name of the rejected set.
        set: String,
        /// Number of variants discovered.
        found: usize,
    },

    /// `build` was asked for a set that was never registered.
    #[error("unknown set '{0}'")]
    UnknownSet(String),

    /// A selected layer file could not be read or decoded.
    #[error("failed to load layer '{}'", .path.display())]
    AssetLoad {
        /// Layer path.
        path: PathBuf,
        /// Underlying read/decode failure.
        #[source]
        source: image::ImageError,
    },

    /// A layer path carries no `#` drawing-order key.
    #[error("layer '{}' has no '#' ordering key", .path.display())]
    MissingOrderKey {
        /// Layer path.
        path: PathBuf,
    },

    /// A layer does not share the canvas size of the base layer.
    #[error(
        "layer '{}' is {}x{}, expected {}x{}",
        .path.display(), .found.0, .found.1, .expected.0, .expected.1
    )]
    LayerDimensions {
        /// Layer path.
        path: PathBuf,
        /// Canvas size (width, height).
        expected: (u32, u32),
        /// Layer size (width, height).
        found: (u32, u32),
    },

    /// Invalid caller-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RobohashError {
    /// Build a [`RobohashError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RobohashError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether a serving layer should answer this failure with a client error.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::UnknownSet(_) | Self::Validation(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
