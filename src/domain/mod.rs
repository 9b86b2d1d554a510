pub mod observe;
pub mod overlay;
pub mod reveal;
pub mod sequencer;
pub mod spring;
pub mod timer;
pub mod tween;
pub mod visibility;
