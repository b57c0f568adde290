/// Lifecycle state of a live tracked object.
///
/// Objects absent for more than `max_disappeared` frames are dropped from the
/// tracker outright, so no removed state is ever observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackState {
    /// Matched to a detection in the most recent frame
    #[default]
    Tracked,
    /// Unmatched for the given number of consecutive frames
    Disappearing(u32),
}

impl TrackState {
    /// State of a live object with the given disappearance count.
    pub fn from_disappeared(count: u32) -> Self {
        match count {
            0 => TrackState::Tracked,
            k => TrackState::Disappearing(k),
        }
    }
}
