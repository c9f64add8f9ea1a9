use crate::path::PointId;

/// Where the reader is in the keyframe sequence
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NavigationCursor {
    /// Index of the current keyframe, always within the path
    pub current_key: usize,
    /// Position along the path, moved by free scrolling and by snapping
    pub current_position: PointId,
}

impl NavigationCursor {
    pub fn new(current_key: usize, current_position: PointId) -> Self {
        Self {
            current_key,
            current_position,
        }
    }

    /// Next index, saturating at `last`
    pub fn next_key(&self, last: usize) -> usize {
        if self.current_key < last {
            self.current_key + 1
        } else {
            last
        }
    }

    /// Previous index, saturating at zero
    pub fn previous_key(&self) -> usize {
        self.current_key.saturating_sub(1)
    }
}
