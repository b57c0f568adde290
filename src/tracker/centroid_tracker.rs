//! Main centroid tracking algorithm.

use std::collections::BTreeMap;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::TrackingError;
use crate::tracker::matching::{Detection, distance_matrix, nearest_detection};
use crate::tracker::tracked_object::{ObjectId, TrackedObject};

/// Snapshot of live objects returned by [`CentroidTracker::update`].
pub type TrackedObjects = BTreeMap<ObjectId, Point2<f64>>;

/// Configuration for the CentroidTracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackerConfig {
    /// Consecutive missed frames an object survives before removal
    pub max_disappeared: u32,
    /// Largest centroid distance still accepted as the same object
    pub dist_thresh: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_disappeared: 50,
            dist_thresh: 50.0,
        }
    }
}

impl TrackerConfig {
    pub fn new(max_disappeared: u32, dist_thresh: f64) -> Self {
        Self {
            max_disappeared,
            dist_thresh,
        }
    }

    /// Reject thresholds the matcher cannot use.
    pub fn validate(&self) -> Result<(), TrackingError> {
        if !self.dist_thresh.is_finite() || self.dist_thresh < 0.0 {
            return Err(TrackingError::InvalidConfig(format!(
                "dist_thresh must be finite and non-negative, got {}",
                self.dist_thresh
            )));
        }
        Ok(())
    }
}

/// Nearest-centroid tracker.
///
/// Each existing object independently snaps to its nearest detection when
/// that detection lies within `dist_thresh`. Assignment is greedy and not
/// exclusive: two objects whose nearest detection is the same index both take
/// its centroid, and that detection does not spawn a new object.
#[derive(Debug, Clone)]
pub struct CentroidTracker {
    objects: BTreeMap<ObjectId, TrackedObject>,
    next_object_id: ObjectId,
    config: TrackerConfig,
}

impl Default for CentroidTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

impl CentroidTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            objects: BTreeMap::new(),
            next_object_id: 0,
            config,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, id: ObjectId) -> Option<&TrackedObject> {
        self.objects.get(&id)
    }

    /// Live objects in ascending id order.
    pub fn objects(&self) -> impl Iterator<Item = &TrackedObject> {
        self.objects.values()
    }

    /// Id the next registered object will receive.
    pub fn next_object_id(&self) -> ObjectId {
        self.next_object_id
    }

    /// Advance the tracker by one frame and return the live objects.
    pub fn update(&mut self, detections: Vec<Detection>) -> TrackedObjects {
        // Step 1: Nothing detected, every live object misses this frame
        if detections.is_empty() {
            let max_disappeared = self.config.max_disappeared;
            self.objects.retain(|&id, obj| {
                let expired = obj.mark_missed(max_disappeared);
                if expired {
                    debug!(object_id = id, "removing object after {} missed frames", obj.disappeared_count);
                }
                !expired
            });
            return self.snapshot();
        }

        let centroids: Vec<Point2<f64>> = detections.iter().map(|d| d.centroid).collect();

        // Step 2: Cold start, register everything in input order
        if self.objects.is_empty() {
            for centroid in centroids {
                self.register(centroid);
            }
            return self.snapshot();
        }

        // Step 3: Nearest-centroid association in ascending id order
        let (object_ids, positions): (Vec<ObjectId>, Vec<Point2<f64>>) = self
            .objects
            .values()
            .map(|obj| (obj.id, obj.position))
            .unzip();
        let dists = distance_matrix(&positions, &centroids);

        let mut used = vec![false; centroids.len()];
        for (row, &id) in dists.rows().into_iter().zip(&object_ids) {
            match nearest_detection(row) {
                Some((j, dist)) if dist <= self.config.dist_thresh => {
                    if let Some(obj) = self.objects.get_mut(&id) {
                        trace!(object_id = id, detection = j, dist, "matched");
                        obj.mark_matched(centroids[j]);
                    }
                    // A used detection stays eligible for later objects.
                    used[j] = true;
                }
                _ => self.mark_missed(id),
            }
        }

        // Step 4: Unclaimed detections become new objects
        for (centroid, used) in centroids.into_iter().zip(used) {
            if !used {
                self.register(centroid);
            }
        }

        self.snapshot()
    }

    fn register(&mut self, centroid: Point2<f64>) {
        let id = self.next_object_id;
        self.next_object_id += 1;
        debug!(object_id = id, x = centroid.x, y = centroid.y, "registering object");
        self.objects.insert(id, TrackedObject::new(id, centroid));
    }

    fn mark_missed(&mut self, id: ObjectId) {
        let Some(obj) = self.objects.get_mut(&id) else {
            return;
        };
        if obj.mark_missed(self.config.max_disappeared) {
            debug!(object_id = id, "removing object after {} missed frames", obj.disappeared_count);
            self.objects.remove(&id);
        }
    }

    fn snapshot(&self) -> TrackedObjects {
        self.objects
            .values()
            .map(|obj| (obj.id, obj.position))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::track_state::TrackState;

    fn point(det: &Detection) -> Point2<f64> {
        det.centroid
    }

    #[test]
    fn test_default_config() {
        let config = TrackerConfig::default();
        assert_eq!(config.max_disappeared, 50);
        assert_eq!(config.dist_thresh, 50.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_negative_threshold_is_invalid() {
        assert!(TrackerConfig::new(5, -1.0).validate().is_err());
        assert!(TrackerConfig::new(5, f64::NAN).validate().is_err());
        assert!(TrackerConfig::new(0, 0.0).validate().is_ok());
    }

    #[test]
    fn test_empty_frame_on_empty_tracker() {
        let mut tracker = CentroidTracker::default();
        assert!(tracker.update(vec![]).is_empty());
        assert_eq!(tracker.next_object_id(), 0);
    }

    #[test]
    fn test_cold_start_registers_in_input_order() {
        let mut tracker = CentroidTracker::default();
        let a = Detection::from_int_tlbr(0, 0, 10, 10);
        let b = Detection::from_int_tlbr(100, 100, 120, 130);

        let objects = tracker.update(vec![a.clone(), b.clone()]);
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[&0], point(&a));
        assert_eq!(objects[&1], point(&b));
        assert_eq!(tracker.get(0).map(|o| o.state()), Some(TrackState::Tracked));
    }

    #[test]
    fn test_unmatched_object_disappears_and_far_detection_registers() {
        let mut tracker = CentroidTracker::new(TrackerConfig::new(5, 10.0));
        tracker.update(vec![Detection::from_int_tlbr(0, 0, 0, 0)]);

        let objects = tracker.update(vec![Detection::from_int_tlbr(100, 100, 100, 100)]);
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[&0], Point2::new(0.0, 0.0));
        assert_eq!(objects[&1], Point2::new(100.0, 100.0));
        assert_eq!(tracker.get(0).map(|o| o.disappeared_count), Some(1));
    }

    #[test]
    fn test_rematch_resets_disappeared_count() {
        let mut tracker = CentroidTracker::new(TrackerConfig::new(5, 10.0));
        tracker.update(vec![Detection::from_int_tlbr(10, 10, 10, 10)]);
        tracker.update(vec![]);
        assert_eq!(tracker.get(0).map(|o| o.disappeared_count), Some(1));

        let objects = tracker.update(vec![Detection::from_int_tlbr(11, 11, 11, 11)]);
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[&0], Point2::new(11.0, 11.0));
        assert_eq!(tracker.get(0).map(|o| o.disappeared_count), Some(0));
        assert_eq!(tracker.next_object_id(), 1);
    }

    #[test]
    fn test_distance_equal_to_threshold_matches() {
        let mut tracker = CentroidTracker::new(TrackerConfig::new(5, 5.0));
        tracker.update(vec![Detection::new(0.0, 0.0, 0.0, 0.0)]);
        let objects = tracker.update(vec![Detection::new(3.0, 4.0, 3.0, 4.0)]);
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[&0], Point2::new(3.0, 4.0));
    }

    #[test]
    fn test_objects_share_nearest_detection() {
        let mut tracker = CentroidTracker::new(TrackerConfig::new(5, 10.0));
        tracker.update(vec![
            Detection::new(0.0, 0.0, 0.0, 0.0),
            Detection::new(4.0, 0.0, 4.0, 0.0),
        ]);

        // Both objects are nearest to the detection at (2, 0); neither is
        // near enough to (50, 50), which therefore registers.
        let objects = tracker.update(vec![
            Detection::new(2.0, 0.0, 2.0, 0.0),
            Detection::new(50.0, 50.0, 50.0, 50.0),
        ]);
        assert_eq!(objects.len(), 3);
        assert_eq!(objects[&0], Point2::new(2.0, 0.0));
        assert_eq!(objects[&1], Point2::new(2.0, 0.0));
        assert_eq!(objects[&2], Point2::new(50.0, 50.0));
    }

    #[test]
    fn test_tie_goes_to_first_detection() {
        let mut tracker = CentroidTracker::new(TrackerConfig::new(5, 10.0));
        tracker.update(vec![Detection::new(0.0, 0.0, 0.0, 0.0)]);

        let objects = tracker.update(vec![
            Detection::new(3.0, 0.0, 3.0, 0.0),
            Detection::new(-3.0, 0.0, -3.0, 0.0),
        ]);
        assert_eq!(objects[&0], Point2::new(3.0, 0.0));
        assert_eq!(objects[&1], Point2::new(-3.0, 0.0));
    }

    #[test]
    fn test_zero_max_disappeared_removes_on_first_miss() {
        let mut tracker = CentroidTracker::new(TrackerConfig::new(0, 10.0));
        tracker.update(vec![Detection::new(0.0, 0.0, 0.0, 0.0)]);

        let objects = tracker.update(vec![Detection::new(500.0, 500.0, 500.0, 500.0)]);
        assert_eq!(objects.keys().copied().collect::<Vec<_>>(), vec![1]);
        assert!(tracker.get(0).is_none());
    }

    #[test]
    fn test_ids_not_reused_after_removal() {
        let mut tracker = CentroidTracker::new(TrackerConfig::new(0, 10.0));
        tracker.update(vec![Detection::new(0.0, 0.0, 0.0, 0.0)]);
        assert!(tracker.update(vec![]).is_empty());

        let objects = tracker.update(vec![Detection::new(0.0, 0.0, 0.0, 0.0)]);
        assert_eq!(objects.keys().copied().collect::<Vec<_>>(), vec![1]);
    }
}
