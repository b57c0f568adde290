//! Centroid-based multi-object tracking.
//!
//! The [`tracker`] module holds the core state machine: a [`CentroidTracker`]
//! assigns stable ids to per-frame detections by nearest-centroid lookup.
//! The [`integration`] and [`codec`] modules connect it to a detection source
//! and a tracking sink without tying the core to any transport.

pub mod codec;
pub mod config;
pub mod error;
pub mod integration;
pub mod tracker;

pub use codec::{JsonLinesSink, JsonLinesSource, decode_detections, encode_tracked_objects};
pub use error::TrackingError;
pub use integration::{DetectionBuilder, DetectionSource, TrackerPipeline, TrackingSink};
pub use tracker::{
    CentroidTracker, Detection, ObjectId, Rect, TrackState, TrackedObject, TrackedObjects,
    TrackerConfig,
};
