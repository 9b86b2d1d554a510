pub mod content;
pub mod event;
pub mod stage;
pub mod world;
