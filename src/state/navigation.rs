//! Turns recognized gestures into facing changes and background scroll requests.
//!
//! A click issues one movement. A completed drag is replayed point by point:
//! the next sample is only dequeued once the scroll for the previous one has
//! reported completion, so the background traces the dragged path.

use std::collections::VecDeque;

use crate::model::{Direction, Offset, Point, Sprite};
use crate::state::gesture::Gesture;
use crate::state::scroll::{ScrollAnimator, ScrollError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    Idle,
    Moving,
    /// Replaying queued drag sample `index` of `total`.
    ReplayingPath { index: usize, total: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// A movement request was handed to the scroll animator.
    Started,
    /// Empty drag path, nothing to do.
    NoOp,
    /// A movement is still in flight; the gesture was dropped.
    Ignored,
}

/// Background displacement for moving towards `dest`. Computed as sprite minus
/// destination, so the background travels opposite to the perceived motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveRequest {
    pub total: Offset,
    pub direction: Direction,
    pub steps: u32,
}

impl MoveRequest {
    pub fn towards(sprite: &Sprite, dest: Point, steps: u32) -> Self {
        let dx = sprite.position.x - dest.x;
        let dy = sprite.position.y - dest.y;
        Self {
            total: Offset::new((dx.floor() as i64).abs(), (dy.floor() as i64).abs()),
            direction: Direction::from_delta(dx, dy),
            steps,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Navigator {
    pub state: NavState,
    queue: VecDeque<Point>,
    drag_steps: u32,
}

impl Navigator {
    pub fn new(drag_steps: u32) -> Self {
        Self {
            state: NavState::Idle,
            queue: VecDeque::new(),
            drag_steps,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state == NavState::Idle
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn handle(
        &mut self,
        gesture: Gesture,
        sprite: &mut Sprite,
        scroll: &mut ScrollAnimator,
    ) -> Result<NavOutcome, ScrollError> {
        if !self.is_idle() {
            return Ok(NavOutcome::Ignored);
        }
        match gesture {
            Gesture::Click(at) => {
                sprite.facing = sprite.angle_to(at);
                let request = MoveRequest::towards(sprite, at, sprite.speed);
                self.issue(request, sprite, scroll)?;
                self.state = NavState::Moving;
                Ok(NavOutcome::Started)
            }
            Gesture::DragComplete(path) => {
                if path.is_empty() {
                    return Ok(NavOutcome::NoOp);
                }
                let total = path.len();
                self.queue = path.into();
                self.replay_next(0, total, sprite, scroll)?;
                Ok(NavOutcome::Started)
            }
        }
    }

    /// Called from the scroll tick that completed the current movement.
    /// Returns true when another queued movement was started.
    pub fn on_scroll_complete(
        &mut self,
        sprite: &mut Sprite,
        scroll: &mut ScrollAnimator,
    ) -> Result<bool, ScrollError> {
        match self.state {
            NavState::ReplayingPath { index, total } if !self.queue.is_empty() => {
                self.replay_next(index + 1, total, sprite, scroll)?;
                Ok(true)
            }
            _ => {
                self.queue.clear();
                self.state = NavState::Idle;
                Ok(false)
            }
        }
    }

    fn replay_next(
        &mut self,
        index: usize,
        total: usize,
        sprite: &mut Sprite,
        scroll: &mut ScrollAnimator,
    ) -> Result<(), ScrollError> {
        let Some(at) = self.queue.pop_front() else {
            self.state = NavState::Idle;
            return Ok(());
        };
        sprite.facing = sprite.angle_to(at);
        let request = MoveRequest::towards(sprite, at, self.drag_steps);
        self.issue(request, sprite, scroll)?;
        self.state = NavState::ReplayingPath { index, total };
        Ok(())
    }

    fn issue(
        &self,
        request: MoveRequest,
        sprite: &Sprite,
        scroll: &mut ScrollAnimator,
    ) -> Result<(), ScrollError> {
        scroll.animate(request.total, request.direction, request.steps, sprite.speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::scroll::Tick;
    use std::f64::consts::PI;

    fn sprite_at(x: f64, y: f64) -> Sprite {
        let mut s = Sprite::default();
        s.set_position(x, y);
        s
    }

    fn drain(scroll: &mut ScrollAnimator) -> u32 {
        let mut ticks = 0;
        while scroll.is_active() {
            ticks += 1;
            if let Tick::Completed(_) = scroll.tick() {
                break;
            }
        }
        ticks
    }

    #[test]
    fn click_rotates_and_scrolls_opposite() {
        let mut nav = Navigator::new(5);
        let mut sprite = sprite_at(500.0, 500.0);
        let mut scroll = ScrollAnimator::default();
        let out = nav
            .handle(Gesture::Click(Point::new(600.0, 500.0)), &mut sprite, &mut scroll)
            .unwrap();
        assert_eq!(out, NavOutcome::Started);
        assert_eq!(nav.state, NavState::Moving);
        assert!((sprite.facing - PI).abs() < 1e-12);
        let plan = scroll.plan().unwrap();
        assert_eq!(plan.total, Offset::new(100, 0));
        assert_eq!(plan.direction, Direction { x: -1, y: 0 });
        assert_eq!(plan.steps, 20);

        assert_eq!(drain(&mut scroll), 20);
        assert!(!nav.on_scroll_complete(&mut sprite, &mut scroll).unwrap());
        assert!(nav.is_idle());
        assert_eq!(scroll.offset(), Offset::new(-100, 0));
    }

    #[test]
    fn facing_is_fixed_at_click_time() {
        let mut nav = Navigator::new(5);
        let mut sprite = sprite_at(10.0, 10.0);
        let mut scroll = ScrollAnimator::default();
        let at = Point::new(-3.0, 42.0);
        nav.handle(Gesture::Click(at), &mut sprite, &mut scroll).unwrap();
        let expected = (10.0f64 - 42.0).atan2(10.0 - -3.0);
        drain(&mut scroll);
        nav.on_scroll_complete(&mut sprite, &mut scroll).unwrap();
        assert_eq!(sprite.facing, expected);
    }

    #[test]
    fn fractional_delta_floors_before_magnitude() {
        let sprite = sprite_at(0.0, 0.0);
        let req = MoveRequest::towards(&sprite, Point::new(10.5, -4.25), 5);
        // dx = -10.5 -> floor -11, dy = 4.25 -> floor 4
        assert_eq!(req.total, Offset::new(11, 4));
        assert_eq!(req.direction, Direction { x: -1, y: 1 });
    }

    #[test]
    fn drag_replays_points_in_order_one_at_a_time() {
        let mut nav = Navigator::new(5);
        let mut sprite = sprite_at(0.0, 0.0);
        let mut scroll = ScrollAnimator::default();
        let path = vec![Point::new(10.0, 10.0), Point::new(20.0, 10.0), Point::new(30.0, 10.0)];
        nav.handle(Gesture::DragComplete(path.clone()), &mut sprite, &mut scroll)
            .unwrap();

        let mut issued = Vec::new();
        for (i, at) in path.iter().enumerate() {
            assert_eq!(nav.state, NavState::ReplayingPath { index: i, total: 3 });
            let plan = scroll.plan().unwrap().clone();
            assert_eq!(plan.steps, 5);
            assert_eq!(sprite.facing, sprite.angle_to(*at));
            issued.push(plan.total);
            // a further request mid-flight is rejected
            assert_eq!(
                nav.handle(Gesture::Click(Point::new(1.0, 1.0)), &mut sprite, &mut scroll)
                    .unwrap(),
                NavOutcome::Ignored
            );
            assert_eq!(drain(&mut scroll), 5);
            let more = nav.on_scroll_complete(&mut sprite, &mut scroll).unwrap();
            assert_eq!(more, i + 1 < path.len());
        }
        assert_eq!(
            issued,
            vec![Offset::new(10, 10), Offset::new(20, 10), Offset::new(30, 10)]
        );
        assert!(nav.is_idle());
        assert_eq!(nav.queued(), 0);
    }

    #[test]
    fn empty_drag_is_noop() {
        let mut nav = Navigator::new(5);
        let mut sprite = sprite_at(0.0, 0.0);
        let mut scroll = ScrollAnimator::default();
        let out = nav
            .handle(Gesture::DragComplete(Vec::new()), &mut sprite, &mut scroll)
            .unwrap();
        assert_eq!(out, NavOutcome::NoOp);
        assert!(nav.is_idle());
        assert!(!scroll.is_active());
        assert_eq!(sprite.facing, 0.0);
    }
}
