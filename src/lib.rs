//! claude-code-sounds — themed sound packs for Claude Code lifecycle hooks.
//!
//! The installer copies sound files from theme packs into `~/.claude/sounds`,
//! drops a playback script into `~/.claude/hooks`, and wires Claude Code's
//! hook events to it through `settings.json`. Mute and do-not-disturb are
//! marker files the playback script checks at runtime, so toggling them
//! never rewrites settings.

pub mod cli;
pub mod error;
pub mod hooks;
pub mod install;
pub mod observability;
pub mod paths;
pub mod state;
pub mod themes;

pub use error::{Result, SoundsError};
