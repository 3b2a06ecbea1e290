//! Game settings and canvas sizing.
//!
//! Settings can be overridden by storing a JSON object under the
//! `hero_config` key in `localStorage`; any field left out keeps its default.

use serde::{Deserialize, Serialize};

use crate::util::cwarn;

pub const CONFIG_STORAGE_KEY: &str = "hero_config";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed logical canvas size. When unset the canvas fills the window,
    /// capped at the background size.
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub background_width: f64,
    pub background_height: f64,
    /// Steps a click movement is split into.
    pub hero_speed: u32,
    pub hero_width: f64,
    pub hero_height: f64,
    pub hero_image: String,
    /// Image scrolled behind the canvas.
    pub background_image: String,
    /// Steps used for each replayed drag sample.
    pub drag_steps: u32,
    /// Scroll stepper cadence in milliseconds.
    pub tick_ms: i32,
    pub marker_size: f64,
    pub marker_color: String,
    pub show_stats: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            background_width: 1000.0,
            background_height: 1000.0,
            hero_speed: 20,
            hero_width: 58.0,
            hero_height: 50.0,
            hero_image: "img/ladybug.png".to_string(),
            background_image: "img/background.png".to_string(),
            drag_steps: 5,
            tick_ms: 1000 / 60,
            marker_size: 5.0,
            marker_color: "red".to_string(),
            show_stats: true,
        }
    }
}

impl GameConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Defaults merged with the stored overrides. Unreadable overrides are
    /// logged and skipped.
    pub fn load() -> Self {
        let raw = web_sys::window()
            .and_then(|win| win.local_storage().ok().flatten())
            .and_then(|store| store.get_item(CONFIG_STORAGE_KEY).ok().flatten());
        match raw {
            Some(raw) => Self::from_json(&raw).unwrap_or_else(|e| {
                cwarn(&format!("ignoring stored {}: {}", CONFIG_STORAGE_KEY, e));
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// Canvas dimensions for a window of `viewport_w` x `viewport_h` CSS pixels.
    pub fn canvas_size(&self, viewport_w: f64, viewport_h: f64, pixel_ratio: f64) -> CanvasSize {
        let css_width = self
            .width
            .unwrap_or_else(|| viewport_w.min(self.background_width))
            .max(0.0);
        let css_height = self
            .height
            .unwrap_or_else(|| viewport_h.min(self.background_height))
            .max(0.0);
        let pixel_ratio = if pixel_ratio > 1.0 { pixel_ratio } else { 1.0 };
        CanvasSize {
            css_width,
            css_height,
            pixel_ratio,
        }
    }

    /// Initial hero position: the centre of the visible part of the background.
    pub fn hero_start(&self, size: &CanvasSize) -> (f64, f64) {
        let w = self.background_width.min(size.css_width);
        let h = self.background_height.min(size.css_height);
        (w / 2.0, h / 2.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasSize {
    pub css_width: f64,
    pub css_height: f64,
    /// Device pixel ratio applied to the backing store, never below 1.
    pub pixel_ratio: f64,
}

impl CanvasSize {
    pub fn backing_width(&self) -> u32 {
        (self.css_width * self.pixel_ratio) as u32
    }

    pub fn backing_height(&self) -> u32 {
        (self.css_height * self.pixel_ratio) as u32
    }

    pub fn is_scaled(&self) -> bool {
        self.pixel_ratio > 1.0
    }
}
