//! Integration module for connecting detection transports with the tracker.
//!
//! This module provides the source and sink traits that keep the tracker
//! independent of any particular transport, plus a pipeline that drives one
//! from the other.

mod builder;
mod detector;
mod pipeline;
mod sink;

pub use builder::DetectionBuilder;
pub use detector::{DetectionSource, FrameReplay};
pub use pipeline::TrackerPipeline;
pub use sink::TrackingSink;
