//! Trait for consumers of tracking results.

use std::convert::Infallible;

use crate::tracker::TrackedObjects;

/// Receives the id to position snapshot produced for every frame.
pub trait TrackingSink {
    /// Error type for publish failures.
    type Error;

    fn publish(&mut self, objects: &TrackedObjects) -> Result<(), Self::Error>;
}

/// Collects every snapshot in memory.
impl TrackingSink for Vec<TrackedObjects> {
    type Error = Infallible;

    fn publish(&mut self, objects: &TrackedObjects) -> Result<(), Self::Error> {
        self.push(objects.clone());
        Ok(())
    }
}
