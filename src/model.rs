//! Core value types shared by the gesture, navigation and scroll state.

use serde::{Deserialize, Serialize};

/// A coordinate in canvas space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Whole-pixel offset, used for the background position and scroll increments.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offset {
    pub x: i64,
    pub y: i64,
}

impl Offset {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Per-axis sign of a movement, each component in `{-1, 0, 1}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Direction {
    pub x: i8,
    pub y: i8,
}

impl Direction {
    pub fn from_delta(dx: f64, dy: f64) -> Self {
        Self {
            x: sign(dx),
            y: sign(dy),
        }
    }
}

fn sign(v: f64) -> i8 {
    if v < 0.0 {
        -1
    } else if v > 0.0 {
        1
    } else {
        0
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    /// Canvas position of the sprite's centre.
    pub position: Point,
    /// Rotation applied when drawing, in radians.
    pub facing: f64,
    /// Steps a click movement is split into.
    pub speed: u32,
    pub width: f64,
    pub height: f64,
}

impl Sprite {
    pub fn new(speed: u32, width: f64, height: f64) -> Self {
        Self {
            position: Point::default(),
            facing: 0.0,
            speed,
            width,
            height,
        }
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.position = Point::new(x, y);
    }

    /// Angle from `target` towards the sprite, the orientation used for both
    /// clicks and replayed drag samples.
    pub fn angle_to(&self, target: Point) -> f64 {
        (self.position.y - target.y).atan2(self.position.x - target.x)
    }
}

impl Default for Sprite {
    fn default() -> Self {
        Self::new(20, 58.0, 50.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn direction_follows_sign_of_delta() {
        assert_eq!(Direction::from_delta(-100.0, 0.0), Direction { x: -1, y: 0 });
        assert_eq!(Direction::from_delta(0.25, -3.0), Direction { x: 1, y: -1 });
    }

    #[test]
    fn angle_points_from_target_to_sprite() {
        let mut s = Sprite::default();
        s.set_position(500.0, 500.0);
        assert!((s.angle_to(Point::new(600.0, 500.0)) - PI).abs() < 1e-12);
        assert!((s.angle_to(Point::new(500.0, 400.0)) - FRAC_PI_2).abs() < 1e-12);
        assert_eq!(s.angle_to(Point::new(400.0, 500.0)), 0.0);
    }
}
