//! Trait for per-frame detection providers.

use std::collections::VecDeque;
use std::convert::Infallible;

use crate::tracker::Detection;

/// A lazy, finite stream of detection frames.
///
/// Implement this trait to connect any transport (message bus, file, socket,
/// detector model) to the tracker.
///
/// # Example
///
/// ```ignore
/// use centroid_track::{Detection, DetectionSource};
///
/// struct MySubscriber {
///     // Your transport here
/// }
///
/// impl DetectionSource for MySubscriber {
///     type Error = std::io::Error;
///
///     fn next_frame(&mut self) -> Option<Result<Vec<Detection>, Self::Error>> {
///         // Receive and decode the next message, or `None` when closed
///         None
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for receive or decode failures.
    type Error;

    /// Fetch the next frame's detections.
    ///
    /// Returns `None` once the stream is exhausted. An `Ok` with an empty
    /// vector is a frame in which nothing was detected.
    fn next_frame(&mut self) -> Option<Result<Vec<Detection>, Self::Error>>;
}

/// In-memory source that replays pre-decoded frames in order.
#[derive(Debug, Clone, Default)]
pub struct FrameReplay {
    frames: VecDeque<Vec<Detection>>,
}

impl FrameReplay {
    pub fn new(frames: impl IntoIterator<Item = Vec<Detection>>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Frames not yet handed out.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl DetectionSource for FrameReplay {
    type Error = Infallible;

    fn next_frame(&mut self) -> Option<Result<Vec<Detection>, Self::Error>> {
        self.frames.pop_front().map(Ok)
    }
}
