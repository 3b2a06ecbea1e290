//! Game context: owns the sprite, gesture and navigation state, the scroll
//! stepper and the redraw flag. The stage component holds one of these in an
//! `Rc<RefCell<_>>` and feeds it host events.

use crate::config::GameConfig;
use crate::model::{Offset, Point, Sprite};
use crate::render::DrawOp;
use crate::state::{
    FrameClock, GestureState, NavOutcome, Navigator, ScrollAnimator, ScrollError, Tick,
};
use crate::util::clog;

#[derive(Debug, Clone)]
pub struct Game {
    pub config: GameConfig,
    pub sprite: Sprite,
    pub gesture: GestureState,
    pub nav: Navigator,
    pub scroll: ScrollAnimator,
    pub clock: FrameClock,
    /// Set by every facing or background change, cleared once painted.
    pub needs_redraw: bool,
    pub running: bool,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let sprite = Sprite::new(config.hero_speed, config.hero_width, config.hero_height);
        let nav = Navigator::new(config.drag_steps);
        Self {
            config,
            sprite,
            gesture: GestureState::default(),
            nav,
            scroll: ScrollAnimator::default(),
            clock: FrameClock::default(),
            needs_redraw: true,
            running: true,
        }
    }

    pub fn place_hero(&mut self, x: f64, y: f64) {
        self.sprite.set_position(x, y);
        self.needs_redraw = true;
    }

    pub fn background_offset(&self) -> Offset {
        self.scroll.offset()
    }

    pub fn toggle_running(&mut self) -> bool {
        self.running = !self.running;
        // a press that straddles a pause is dropped
        self.gesture.cancel();
        self.needs_redraw = true;
        self.running
    }

    pub fn pointer_down(&mut self, at: Point) {
        if self.running {
            self.gesture.pointer_down(at);
        }
    }

    pub fn pointer_move(&mut self, at: Point) {
        if self.running {
            self.gesture.pointer_move(at);
        }
    }

    pub fn pointer_cancel(&mut self) {
        self.gesture.cancel();
    }

    /// Resolve the release into a gesture and hand it to navigation.
    pub fn pointer_up(&mut self, at: Point) -> Result<NavOutcome, ScrollError> {
        if !self.running {
            return Ok(NavOutcome::Ignored);
        }
        let gesture = self.gesture.pointer_up(at);
        let outcome = self
            .nav
            .handle(gesture, &mut self.sprite, &mut self.scroll)?;
        match outcome {
            NavOutcome::Started => self.needs_redraw = true,
            NavOutcome::Ignored => clog("movement in progress, gesture ignored"),
            NavOutcome::NoOp => {}
        }
        Ok(outcome)
    }

    /// Advance the scroll stepper by one cadence tick. Returns the new
    /// background offset when it moved. A completed movement chains the next
    /// queued drag sample within the same tick.
    pub fn scroll_tick(&mut self) -> Result<Option<Offset>, ScrollError> {
        if !self.running {
            return Ok(None);
        }
        match self.scroll.tick() {
            Tick::Idle => Ok(None),
            Tick::Stepped(offset) => {
                self.needs_redraw = true;
                Ok(Some(offset))
            }
            Tick::Completed(offset) => {
                self.needs_redraw = true;
                self.nav
                    .on_scroll_complete(&mut self.sprite, &mut self.scroll)?;
                Ok(Some(offset))
            }
        }
    }

    /// Per-frame update. Returns what to paint; empty while paused.
    pub fn frame(&mut self, now_ms: f64) -> Vec<DrawOp> {
        if !self.running {
            return Vec::new();
        }
        self.clock.tick(now_ms);
        self.render_ops()
    }

    pub fn render_ops(&mut self) -> Vec<DrawOp> {
        let mut ops = Vec::new();
        if self.needs_redraw {
            ops.push(DrawOp::Clear {
                width: self.config.background_width,
                height: self.config.background_height,
            });
            ops.push(DrawOp::Sprite {
                x: self.sprite.position.x,
                y: self.sprite.position.y,
                angle: self.sprite.facing,
                width: self.sprite.width,
                height: self.sprite.height,
            });
            self.needs_redraw = false;
        }
        if let Some(at) = self.gesture.drag_marker() {
            ops.push(DrawOp::Marker {
                x: at.x,
                y: at.y,
                size: self.config.marker_size,
                color: self.config.marker_color.clone(),
            });
        }
        ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::NavState;
    use std::f64::consts::PI;

    fn game_at(x: f64, y: f64) -> Game {
        let mut g = Game::new(GameConfig::default());
        g.place_hero(x, y);
        g.render_ops();
        g
    }

    fn tick_until_idle(g: &mut Game) -> u32 {
        let mut ticks = 0;
        while g.scroll_tick().unwrap().is_some() {
            ticks += 1;
        }
        ticks
    }

    #[test]
    fn click_scenario() {
        let mut g = game_at(500.0, 500.0);
        g.pointer_down(Point::new(600.0, 500.0));
        let out = g.pointer_up(Point::new(600.0, 500.0)).unwrap();
        assert_eq!(out, NavOutcome::Started);
        assert!((g.sprite.facing - PI).abs() < 1e-12);
        assert!(g.needs_redraw);
        assert_eq!(tick_until_idle(&mut g), 20);
        assert_eq!(g.background_offset(), Offset::new(-100, 0));
        assert!(g.nav.is_idle());
    }

    #[test]
    fn drag_scenario_replays_three_requests() {
        let mut g = game_at(0.0, 0.0);
        g.pointer_down(Point::new(0.0, 0.0));
        for x in [10.0, 20.0, 30.0] {
            g.pointer_move(Point::new(x, 10.0));
        }
        g.pointer_up(Point::new(30.0, 10.0)).unwrap();

        let mut completions = Vec::new();
        let mut ticks = 0;
        while g.scroll_tick().unwrap().is_some() {
            ticks += 1;
            if ticks % 5 == 0 {
                completions.push(g.nav.state);
            }
        }
        assert_eq!(ticks, 15);
        assert_eq!(
            completions,
            vec![
                NavState::ReplayingPath { index: 1, total: 3 },
                NavState::ReplayingPath { index: 2, total: 3 },
                NavState::Idle,
            ]
        );
        // 10/5, 20/5 and 30/5 per tick on x, 10/5 on y, all towards negative
        assert_eq!(g.background_offset(), Offset::new(-60, -30));
    }

    #[test]
    fn press_release_without_move_is_click() {
        let mut g = game_at(100.0, 100.0);
        g.pointer_down(Point::new(50.0, 100.0));
        g.pointer_up(Point::new(50.0, 100.0)).unwrap();
        assert_eq!(g.nav.state, NavState::Moving);
        assert_eq!(g.sprite.facing, 0.0);
    }

    #[test]
    fn gesture_during_movement_is_dropped() {
        let mut g = game_at(0.0, 0.0);
        g.pointer_down(Point::new(40.0, 0.0));
        g.pointer_up(Point::new(40.0, 0.0)).unwrap();
        g.scroll_tick().unwrap();
        let facing = g.sprite.facing;
        g.pointer_down(Point::new(0.0, 40.0));
        assert_eq!(
            g.pointer_up(Point::new(0.0, 40.0)).unwrap(),
            NavOutcome::Ignored
        );
        assert_eq!(g.sprite.facing, facing);
        assert_eq!(tick_until_idle(&mut g), 19);
        assert_eq!(g.background_offset(), Offset::new(-40, 0));
    }

    #[test]
    fn render_is_idempotent_without_changes() {
        let mut g = game_at(10.0, 10.0);
        g.needs_redraw = true;
        let first = g.frame(0.0);
        assert!(matches!(first[0], DrawOp::Clear { .. }));
        assert!(matches!(first[1], DrawOp::Sprite { .. }));
        assert!(g.frame(16.0).is_empty());
    }

    #[test]
    fn drag_marker_drawn_every_frame_on_top() {
        let mut g = game_at(10.0, 10.0);
        g.pointer_down(Point::new(0.0, 0.0));
        g.pointer_move(Point::new(3.0, 4.0));
        let marker = DrawOp::Marker {
            x: 3.0,
            y: 4.0,
            size: 5.0,
            color: "red".to_string(),
        };
        assert_eq!(g.frame(0.0), vec![marker.clone()]);
        assert_eq!(g.frame(16.0), vec![marker.clone()]);
        g.needs_redraw = true;
        let ops = g.frame(32.0);
        assert_eq!(ops.len(), 3);
        assert_eq!(ops[2], marker);
    }

    #[test]
    fn sprite_op_carries_facing() {
        let mut g = game_at(500.0, 500.0);
        g.pointer_down(Point::new(500.0, 400.0));
        g.pointer_up(Point::new(500.0, 400.0)).unwrap();
        let ops = g.render_ops();
        assert_eq!(
            ops[1],
            DrawOp::Sprite {
                x: 500.0,
                y: 500.0,
                angle: (100.0f64).atan2(0.0),
                width: 58.0,
                height: 50.0,
            }
        );
    }

    #[test]
    fn paused_game_ignores_input_and_holds_scroll() {
        let mut g = game_at(0.0, 0.0);
        g.pointer_down(Point::new(20.0, 0.0));
        g.pointer_up(Point::new(20.0, 0.0)).unwrap();
        g.scroll_tick().unwrap();
        assert!(!g.toggle_running());
        assert_eq!(g.scroll_tick().unwrap(), None);
        assert!(g.frame(0.0).is_empty());
        g.pointer_down(Point::new(5.0, 5.0));
        assert!(!g.gesture.pointer_down);
        assert!(g.toggle_running());
        assert_eq!(tick_until_idle(&mut g), 19);
        assert_eq!(g.background_offset(), Offset::new(-20, 0));
    }
}
