//! JSON wire format for detection frames and tracking results.
//!
//! Inbound, one frame is an array of objects carrying a `bbox` field:
//!
//! ```json
//! [{"bbox": [10, 20, 50, 80], "label": "person"}, {"bbox": [0, 0, 4, 4]}]
//! ```
//!
//! Fields other than `bbox` are ignored. Outbound, a snapshot is an object
//! keyed by decimal object id:
//!
//! ```json
//! {"0": [30.0, 50.0], "1": [2.0, 2.0]}
//! ```
//!
//! [`JsonLinesSource`] and [`JsonLinesSink`] carry one such document per line.

use std::collections::BTreeMap;
use std::io::{BufRead, Write};

use nalgebra::Point2;
use serde_json::{Map, Value};

use crate::error::TrackingError;
use crate::integration::{DetectionBuilder, DetectionSource, TrackingSink};
use crate::tracker::{Detection, ObjectId, TrackedObjects};

/// Decode one frame of detections.
///
/// A bbox made only of integers uses integer centroid arithmetic; any real
/// component switches the whole box to real arithmetic.
pub fn decode_detections(payload: &str) -> Result<Vec<Detection>, TrackingError> {
    // Items are read as maps so that arrays never stand in for objects.
    let frame: Vec<Map<String, Value>> =
        serde_json::from_str(payload).map_err(TrackingError::Decode)?;

    frame
        .iter()
        .enumerate()
        .map(|(index, det)| match det.get("bbox") {
            Some(Value::Array(bbox)) => bbox_to_detection(index, bbox),
            Some(_) => Err(TrackingError::malformed(index, "bbox must be an array")),
            None => Err(TrackingError::malformed(index, "missing bbox field")),
        })
        .collect()
}

fn bbox_to_detection(index: usize, bbox: &[Value]) -> Result<Detection, TrackingError> {
    if bbox.len() != 4 {
        return Err(TrackingError::malformed(
            index,
            format!("bbox needs 4 values, got {}", bbox.len()),
        ));
    }

    let builder = DetectionBuilder::new().index(index);
    let ints: Option<Vec<i64>> = bbox.iter().map(Value::as_i64).collect();
    if let Some(c) = ints {
        return builder.tlbr_int(c[0], c[1], c[2], c[3]).build();
    }

    let reals: Option<Vec<f64>> = bbox.iter().map(Value::as_f64).collect();
    match reals {
        Some(c) => builder.tlbr(c[0], c[1], c[2], c[3]).build(),
        None => Err(TrackingError::malformed(index, "bbox values must be numbers")),
    }
}

/// Encode a tracking snapshot as a JSON object of `id -> [x, y]`.
pub fn encode_tracked_objects(objects: &TrackedObjects) -> Result<String, TrackingError> {
    let wire: BTreeMap<ObjectId, [f64; 2]> = objects
        .iter()
        .map(|(&id, p)| (id, [p.x, p.y]))
        .collect();
    serde_json::to_string(&wire).map_err(TrackingError::Encode)
}

/// Decode a snapshot produced by [`encode_tracked_objects`].
pub fn decode_tracked_objects(payload: &str) -> Result<TrackedObjects, TrackingError> {
    let wire: BTreeMap<ObjectId, [f64; 2]> =
        serde_json::from_str(payload).map_err(TrackingError::Decode)?;
    Ok(wire
        .into_iter()
        .map(|(id, [x, y])| (id, Point2::new(x, y)))
        .collect())
}

/// Reads one JSON detection frame per line. Blank lines are skipped.
pub struct JsonLinesSource<R> {
    reader: R,
    line: String,
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
        }
    }
}

impl<R: BufRead> DetectionSource for JsonLinesSource<R> {
    type Error = TrackingError;

    fn next_frame(&mut self) -> Option<Result<Vec<Detection>, Self::Error>> {
        loop {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => return None,
                Ok(_) if self.line.trim().is_empty() => continue,
                Ok(_) => return Some(decode_detections(self.line.trim())),
                Err(err) => return Some(Err(err.into())),
            }
        }
    }
}

/// Writes one JSON snapshot per line, flushing after each frame.
pub struct JsonLinesSink<W> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TrackingSink for JsonLinesSink<W> {
    type Error = TrackingError;

    fn publish(&mut self, objects: &TrackedObjects) -> Result<(), Self::Error> {
        let line = encode_tracked_objects(objects)?;
        writeln!(self.writer, "{line}")?;
        self.writer.flush()?;
        Ok(())
    }
}
