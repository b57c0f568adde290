//! TrackerPipeline for connecting a detection source, the tracker and a sink.

use tracing::{info, warn};

use crate::error::TrackingError;
use crate::tracker::{CentroidTracker, TrackedObjects, TrackerConfig};

use super::{DetectionSource, TrackingSink};

/// Drives a [`CentroidTracker`] from a [`DetectionSource`] into a [`TrackingSink`].
///
/// Frames are processed strictly one at a time. A frame whose payload fails
/// to decode is logged and tracked as an empty frame, so it ages existing
/// objects but never corrupts them. Any other source or sink error stops the
/// pipeline.
pub struct TrackerPipeline<D, S> {
    source: D,
    sink: S,
    tracker: CentroidTracker,
    frames: u64,
}

impl<D, S> TrackerPipeline<D, S>
where
    D: DetectionSource,
    D::Error: Into<TrackingError>,
    S: TrackingSink,
    S::Error: Into<TrackingError>,
{
    /// Create a new tracking pipeline with the given source, sink and tracker config.
    pub fn new(source: D, sink: S, config: TrackerConfig) -> Self {
        Self {
            source,
            sink,
            tracker: CentroidTracker::new(config),
            frames: 0,
        }
    }

    /// Create a new tracking pipeline with default tracker configuration.
    pub fn with_default_config(source: D, sink: S) -> Self {
        Self::new(source, sink, TrackerConfig::default())
    }

    /// Process a single frame and publish the resulting snapshot.
    ///
    /// Returns `Ok(None)` once the source is exhausted.
    pub fn process_frame(&mut self) -> Result<Option<TrackedObjects>, TrackingError> {
        let Some(frame) = self.source.next_frame() else {
            return Ok(None);
        };

        let detections = match frame.map_err(Into::into) {
            Ok(detections) => detections,
            Err(err) if err.is_frame_error() => {
                warn!(frame = self.frames, error = %err, "treating undecodable frame as empty");
                Vec::new()
            }
            Err(err) => return Err(err),
        };

        // The frame counts once the tracker has consumed it, published or not.
        let frame = self.frames;
        let objects = self.tracker.update(detections);
        self.frames += 1;

        self.sink.publish(&objects).map_err(Into::into)?;
        info!(frame, "Tracked {} objects", objects.len());
        Ok(Some(objects))
    }

    /// Process frames until the source is exhausted.
    ///
    /// Returns the number of frames processed by this pipeline so far.
    pub fn run(&mut self) -> Result<u64, TrackingError> {
        while self.process_frame()?.is_some() {}
        Ok(self.frames)
    }

    /// Number of frames processed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Get a reference to the underlying source.
    pub fn source(&self) -> &D {
        &self.source
    }

    /// Get a reference to the underlying sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Get a mutable reference to the underlying sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &CentroidTracker {
        &self.tracker
    }

    /// Consume the pipeline, returning the source, sink and tracker.
    pub fn into_parts(self) -> (D, S, CentroidTracker) {
        (self.source, self.sink, self.tracker)
    }
}
