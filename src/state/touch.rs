// Single-finger touch tracking. `touchend` carries no active touches, so the
// release position is the last sampled one.
use crate::model::Point;

#[derive(Default, Debug, Clone)]
pub struct TouchState {
    pub single_active: bool,
    pub last_touch_x: f64,
    pub last_touch_y: f64,
}

impl TouchState {
    pub fn begin(&mut self, at: Point) {
        self.single_active = true;
        self.track(at);
    }

    pub fn track(&mut self, at: Point) {
        self.last_touch_x = at.x;
        self.last_touch_y = at.y;
    }

    /// Ends the touch and returns where it was released, if one was active.
    pub fn end(&mut self) -> Option<Point> {
        if !self.single_active {
            return None;
        }
        self.single_active = false;
        Some(Point::new(self.last_touch_x, self.last_touch_y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_uses_last_tracked_point() {
        let mut t = TouchState::default();
        t.begin(Point::new(1.0, 2.0));
        t.track(Point::new(8.0, 9.0));
        assert_eq!(t.end(), Some(Point::new(8.0, 9.0)));
        assert_eq!(t.end(), None);
    }
}
