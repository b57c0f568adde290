//! Centroid distance utilities for nearest-neighbour matching.

use crate::tracker::rect::Rect;
use nalgebra::Point2;
use ndarray::{Array2, ArrayView1};

/// Detection input for the tracker.
///
/// A detection is reduced to its centroid as soon as it is built; the box is
/// kept only for callers that want to inspect it.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Bounding box in TLWH form
    pub bbox: Rect,
    /// Centroid used for matching
    pub centroid: Point2<f64>,
}

impl Detection {
    /// Detection from real-valued TLBR corners. The centroid is
    /// `((x1 + x2) / 2, (y1 + y2) / 2)`, taken from the corners directly.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            bbox: Rect::from_tlbr(x1, y1, x2, y2),
            centroid: Point2::new((x1 + x2) / 2.0, (y1 + y2) / 2.0),
        }
    }

    /// Detection from integer TLBR corners. The centroid is floored to the
    /// pixel grid, `((x1 + x2) / 2, (y1 + y2) / 2)` in integer arithmetic.
    pub fn from_int_tlbr(x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        Self {
            bbox: Rect::from_tlbr(x1 as f64, y1 as f64, x2 as f64, y2 as f64),
            centroid: Point2::new(floor_midpoint(x1, x2) as f64, floor_midpoint(y1, y2) as f64),
        }
    }
}

/// `floor((a + b) / 2)` without overflowing on large inputs.
fn floor_midpoint(a: i64, b: i64) -> i64 {
    a.div_euclid(2) + b.div_euclid(2) + (a.rem_euclid(2) + b.rem_euclid(2)) / 2
}

/// Compute the Euclidean distance matrix between tracked positions and
/// detection centroids.
///
/// Returns a matrix of shape (M, N) where M is the length of `positions`
/// and N is the length of `centroids`.
pub fn distance_matrix(positions: &[Point2<f64>], centroids: &[Point2<f64>]) -> Array2<f64> {
    let mut dists = Array2::zeros((positions.len(), centroids.len()));
    for (i, p) in positions.iter().enumerate() {
        for (j, c) in centroids.iter().enumerate() {
            dists[[i, j]] = nalgebra::distance(p, c);
        }
    }
    dists
}

/// Index and value of the smallest entry in a distance row.
///
/// Ties resolve to the first occurrence. Returns `None` for an empty row.
pub fn nearest_detection(row: ArrayView1<f64>) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (j, &d) in row.iter().enumerate() {
        let closer = match best {
            Some((_, min)) => d < min,
            None => true,
        };
        if closer {
            best = Some((j, d));
        }
    }
    best
}
