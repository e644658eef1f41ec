pub mod handler;

pub use handler::{InputHandler, InputMode, KeyAction};
