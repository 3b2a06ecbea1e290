pub mod app;
pub mod fps_overlay;
pub mod stage;
