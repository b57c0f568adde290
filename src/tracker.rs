mod centroid_tracker;
mod matching;
mod rect;
mod track_state;
mod tracked_object;

pub use centroid_tracker::{CentroidTracker, TrackedObjects, TrackerConfig};
pub use matching::{Detection, distance_matrix, nearest_detection};
pub use rect::Rect;
pub use track_state::TrackState;
pub use tracked_object::{ObjectId, TrackedObject};
