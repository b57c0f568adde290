//! Builder for creating validated Detection objects from raw corner values.

use crate::error::TrackingError;
use crate::tracker::Detection;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Corners {
    Int([i64; 4]),
    Real([f64; 4]),
}

impl Default for Corners {
    fn default() -> Self {
        Corners::Real([0.0; 4])
    }
}

/// Builder for creating `Detection` objects from various input formats.
///
/// Unlike [`Detection::new`], [`DetectionBuilder::build`] checks the corner
/// order and rejects bad boxes with [`TrackingError::MalformedDetection`].
#[derive(Debug, Clone, Default)]
pub struct DetectionBuilder {
    corners: Corners,
    index: usize,
}

impl DetectionBuilder {
    /// Create a new detection builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Position of this detection within its frame, reported in errors.
    pub fn index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    /// Set bounding box in TLBR format (x1, y1, x2, y2).
    pub fn tlbr(mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        self.corners = Corners::Real([x1, y1, x2, y2]);
        self
    }

    /// Set bounding box in TLBR format with integer pixel coordinates.
    /// The centroid is computed with integer floor division.
    pub fn tlbr_int(mut self, x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        self.corners = Corners::Int([x1, y1, x2, y2]);
        self
    }

    /// Set bounding box in XYWH format (center_x, center_y, width, height).
    pub fn xywh(mut self, cx: f64, cy: f64, w: f64, h: f64) -> Self {
        self.corners = Corners::Real([cx - w / 2.0, cy - h / 2.0, cx + w / 2.0, cy + h / 2.0]);
        self
    }

    /// Build the final `Detection`.
    pub fn build(self) -> Result<Detection, TrackingError> {
        match self.corners {
            Corners::Int([x1, y1, x2, y2]) => {
                if x1 > x2 || y1 > y2 {
                    return Err(self.inverted([x1 as f64, y1 as f64, x2 as f64, y2 as f64]));
                }
                Ok(Detection::from_int_tlbr(x1, y1, x2, y2))
            }
            Corners::Real([x1, y1, x2, y2]) => {
                let finite = [x1, y1, x2, y2].iter().all(|c| c.is_finite());
                if !finite || x1 > x2 || y1 > y2 {
                    return Err(self.inverted([x1, y1, x2, y2]));
                }
                Ok(Detection::new(x1, y1, x2, y2))
            }
        }
    }

    fn inverted(&self, [x1, y1, x2, y2]: [f64; 4]) -> TrackingError {
        TrackingError::malformed(
            self.index,
            format!("expected x1 <= x2 and y1 <= y2, got [{x1}, {y1}, {x2}, {y2}]"),
        )
    }
}
