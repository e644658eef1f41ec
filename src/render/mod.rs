pub mod renderer;

pub use renderer::{AppView, Renderer};
