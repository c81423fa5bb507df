//! Interactive terminal layer — prompts, styling, and sound preview.

pub mod installer;
pub mod preview;

pub use preview::PreviewPlayer;
