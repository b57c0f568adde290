//! Error types for the tracking boundary.
//!
//! The tracker core never fails; these errors come from decoding detection
//! frames, encoding results, I/O and configuration loading.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackingError {
    /// A detection in a frame could not be turned into a rectangle.
    #[error("malformed detection at index {index}: {reason}")]
    MalformedDetection { index: usize, reason: String },

    /// A frame payload was not valid JSON of the expected shape.
    #[error("failed to decode detection frame: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to encode tracked objects: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl From<std::convert::Infallible> for TrackingError {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}

impl TrackingError {
    pub(crate) fn malformed(index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedDetection {
            index,
            reason: reason.into(),
        }
    }

    /// `true` for errors confined to a single frame's payload. Such frames
    /// are skipped by the pipeline instead of aborting the stream.
    pub fn is_frame_error(&self) -> bool {
        matches!(self, Self::MalformedDetection { .. } | Self::Decode(_))
    }
}
