pub mod hit;
pub mod input;
pub mod renderer;
