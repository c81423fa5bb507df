//! Hooks — the fixed lifecycle categories and the Claude Code settings
//! integration that wires them to the playback script.

pub mod events;
pub mod install;

pub use events::HookCategory;
pub use install::{install_hooks_config, uninstall_all, Removed};
