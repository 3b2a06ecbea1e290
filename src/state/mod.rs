pub mod frame;
pub mod gesture;
pub mod navigation;
pub mod scroll;
pub mod touch;

pub use frame::FrameClock;
pub use gesture::{Gesture, GestureState};
pub use navigation::{NavOutcome, NavState, Navigator};
pub use scroll::{ScrollAnimator, ScrollError, Tick};
pub use touch::TouchState;
