// Pointer gesture recognition: press/move/release into clicks and drags.
use crate::model::Point;

#[derive(Clone, Debug, PartialEq)]
pub enum Gesture {
    Click(Point),
    /// Sampled drag path in recording order. May be empty when no move
    /// sample arrived between the drag start and the release.
    DragComplete(Vec<Point>),
}

#[derive(Default, Debug, Clone)]
pub struct GestureState {
    pub pointer_down: bool,
    pub dragging: bool,
    pub path: Vec<Point>,
    pub last_sample: Option<Point>,
}

impl GestureState {
    pub fn pointer_down(&mut self, _at: Point) {
        self.pointer_down = true;
    }

    pub fn pointer_move(&mut self, at: Point) {
        if !self.pointer_down {
            return;
        }
        if !self.dragging {
            self.dragging = true;
            self.path.clear();
        }
        self.path.push(at);
        self.last_sample = Some(at);
    }

    pub fn pointer_up(&mut self, at: Point) -> Gesture {
        let gesture = if self.dragging {
            self.dragging = false;
            self.last_sample = None;
            Gesture::DragComplete(std::mem::take(&mut self.path))
        } else {
            Gesture::Click(at)
        };
        self.pointer_down = false;
        gesture
    }

    /// Drop the current press without producing a gesture (pointer left the
    /// canvas, touch cancelled).
    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    /// Latest drag sample, only while a drag is in progress.
    pub fn drag_marker(&self) -> Option<Point> {
        if self.dragging { self.last_sample } else { None }
    }
}
