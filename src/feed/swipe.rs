//! Swipe navigation for narrow viewports

/// Horizontal distance in pixels a drag must exceed to change item
pub const SWIPE_THRESHOLD_PX: f64 = 50.0;

/// Damping applied when dragging past the first or last item
pub const EDGE_RESISTANCE: f64 = 0.3;

/// Tracks a horizontal drag over a single-file strip of `len` items.
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeTracker {
    index: usize,
    len: usize,
    start_x: Option<f64>,
    current_x: f64,
}

impl SwipeTracker {
    pub fn new(len: usize) -> Self {
        Self {
            index: 0,
            len,
            start_x: None,
            current_x: 0.0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_dragging(&self) -> bool {
        self.start_x.is_some()
    }

    /// Updates the item count, clamping the current index.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.index = self.index.min(len.saturating_sub(1));
    }

    pub fn touch_start(&mut self, x: f64) {
        self.start_x = Some(x);
        self.current_x = x;
    }

    /// Records the finger position and returns the rendered drag offset.
    pub fn touch_move(&mut self, x: f64) -> f64 {
        if self.start_x.is_some() {
            self.current_x = x;
        }
        self.offset()
    }

    /// Current drag offset, damped when pulling past either end.
    pub fn offset(&self) -> f64 {
        let Some(start) = self.start_x else {
            return 0.0;
        };
        let delta = self.current_x - start;
        let past_first = self.index == 0 && delta > 0.0;
        let past_last = self.index + 1 >= self.len && delta < 0.0;
        if past_first || past_last {
            delta * EDGE_RESISTANCE
        } else {
            delta
        }
    }

    /// Ends the drag, committing a move when it exceeded the threshold.
    ///
    /// Returns the resulting index. Short drags snap back.
    pub fn touch_end(&mut self) -> usize {
        if let Some(start) = self.start_x.take() {
            let delta = self.current_x - start;
            if delta > SWIPE_THRESHOLD_PX && self.index > 0 {
                self.index -= 1;
            } else if delta < -SWIPE_THRESHOLD_PX && self.index + 1 < self.len {
                self.index += 1;
            }
        }
        self.index
    }

    /// Abandons the drag without moving.
    pub fn cancel(&mut self) {
        self.start_x = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swipe(tracker: &mut SwipeTracker, dx: f64) -> usize {
        tracker.touch_start(200.0);
        tracker.touch_move(200.0 + dx);
        tracker.touch_end()
    }

    #[test]
    fn test_swipe_left_advances() {
        let mut tracker = SwipeTracker::new(8);
        assert_eq!(swipe(&mut tracker, -60.0), 1);
    }

    #[test]
    fn test_swipe_right_retreats() {
        let mut tracker = SwipeTracker::new(8);
        swipe(&mut tracker, -60.0);
        swipe(&mut tracker, -60.0);
        assert_eq!(swipe(&mut tracker, 60.0), 1);
    }

    #[test]
    fn test_short_drag_snaps_back() {
        let mut tracker = SwipeTracker::new(8);
        swipe(&mut tracker, -60.0);
        assert_eq!(swipe(&mut tracker, 30.0), 1);
        assert_eq!(swipe(&mut tracker, -30.0), 1);
        assert_eq!(tracker.offset(), 0.0);
    }

    #[test]
    fn test_no_move_past_ends() {
        let mut tracker = SwipeTracker::new(2);
        assert_eq!(swipe(&mut tracker, 80.0), 0);
        swipe(&mut tracker, -80.0);
        assert_eq!(swipe(&mut tracker, -80.0), 1);
    }

    #[test]
    fn test_edge_resistance() {
        let mut tracker = SwipeTracker::new(3);
        tracker.touch_start(100.0);
        assert_eq!(tracker.touch_move(200.0), 100.0 * EDGE_RESISTANCE);
        assert_eq!(tracker.touch_move(40.0), -60.0);
        tracker.cancel();

        tracker.set_len(1);
        tracker.touch_start(100.0);
        assert_eq!(tracker.touch_move(0.0), -100.0 * EDGE_RESISTANCE);
    }

    #[test]
    fn test_move_without_start_is_ignored() {
        let mut tracker = SwipeTracker::new(3);
        assert_eq!(tracker.touch_move(500.0), 0.0);
        assert_eq!(tracker.touch_end(), 0);
    }

    #[test]
    fn test_set_len_clamps_index() {
        let mut tracker = SwipeTracker::new(5);
        swipe(&mut tracker, -60.0);
        swipe(&mut tracker, -60.0);
        tracker.set_len(2);
        assert_eq!(tracker.index(), 1);
        tracker.set_len(0);
        assert_eq!(tracker.index(), 0);
    }
}
