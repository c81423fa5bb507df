//! Theme packs — descriptor schema and the on-disk registry.

pub mod registry;
pub mod schema;

pub use registry::{list_themes, load_theme, ThemeSummary};
pub use schema::{CategorySounds, SoundFile, ThemeDescriptor};
