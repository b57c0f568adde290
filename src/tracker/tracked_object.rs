//! A single object carried by the centroid tracker.

use nalgebra::Point2;

use crate::tracker::track_state::TrackState;

/// Identifier handed out by a tracker instance. Never reused.
pub type ObjectId = u64;

/// Single tracked object.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedObject {
    /// Unique object identifier
    pub id: ObjectId,
    /// Centroid of the last matched detection
    pub position: Point2<f64>,
    /// Consecutive frames without a match
    pub disappeared_count: u32,
}

impl TrackedObject {
    pub(crate) fn new(id: ObjectId, position: Point2<f64>) -> Self {
        Self {
            id,
            position,
            disappeared_count: 0,
        }
    }

    pub fn state(&self) -> TrackState {
        TrackState::from_disappeared(self.disappeared_count)
    }

    /// Snap to a matched centroid.
    pub(crate) fn mark_matched(&mut self, centroid: Point2<f64>) {
        self.position = centroid;
        self.disappeared_count = 0;
    }

    /// Record one more missed frame and report whether the object has now
    /// been absent for longer than `max_disappeared` frames.
    pub(crate) fn mark_missed(&mut self, max_disappeared: u32) -> bool {
        self.disappeared_count = self.disappeared_count.saturating_add(1);
        self.disappeared_count > max_disappeared
    }
}
