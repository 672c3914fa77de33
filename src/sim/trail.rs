use std::collections::VecDeque;

use nalgebra::Point2;

/// Maximum number of remembered satellite positions.
pub const TRAIL_CAPACITY: usize = 200;

// ---------------------------------------------------------------------------
// Bounded FIFO of screen-space satellite positions
// ---------------------------------------------------------------------------

/// Oldest-first history of recent satellite screen positions. Appending past
/// [`TRAIL_CAPACITY`] evicts the oldest point.
#[derive(Debug, Clone, Default)]
pub struct TrailHistory {
    points: VecDeque<Point2<f64>>,
}

impl TrailHistory {
    pub fn new() -> Self {
        Self { points: VecDeque::with_capacity(TRAIL_CAPACITY) }
    }

    /// Capped append; returns the evicted point, if any.
    pub fn push(&mut self, point: Point2<f64>) -> Option<Point2<f64>> {
        let evicted = if self.points.len() >= TRAIL_CAPACITY {
            self.points.pop_front()
        } else {
            None
        };
        self.points.push_back(point);
        evicted
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn oldest(&self) -> Option<&Point2<f64>> {
        self.points.front()
    }

    pub fn newest(&self) -> Option<&Point2<f64>> {
        self.points.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point2<f64>> + '_ {
        self.points.iter()
    }
}
