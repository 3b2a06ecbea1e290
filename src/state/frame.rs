// Frame clock: elapsed time between animation frames plus a once-per-second FPS figure.
#[derive(Default, Debug, Clone)]
pub struct FrameClock {
    pub last_ms: Option<f64>,
    pub delta_ms: f64,
    window_start_ms: f64,
    frames_in_window: u32,
    pub fps: Option<u32>,
}

impl FrameClock {
    /// Record a frame at `now_ms`. Returns the elapsed time since the previous
    /// frame (0 for the first one).
    pub fn tick(&mut self, now_ms: f64) -> f64 {
        let Some(prev) = self.last_ms.replace(now_ms) else {
            self.window_start_ms = now_ms;
            self.delta_ms = 0.0;
            return 0.0;
        };
        self.delta_ms = (now_ms - prev).max(0.0);
        self.frames_in_window += 1;
        let window = now_ms - self.window_start_ms;
        if window >= 1000.0 {
            self.fps = Some(((self.frames_in_window as f64) * 1000.0 / window).round() as u32);
            self.frames_in_window = 0;
            self.window_start_ms = now_ms;
        }
        self.delta_ms
    }
}
