//! Filesystem layout — every path the installer touches, bundled in one
//! struct and passed explicitly (no globals).
//!
//! The Claude side lives under `<claude_dir>` (normally `~/.claude`):
//! sounds, hooks, slash commands, and `settings.json`. The package side
//! lives under `<pkg_dir>`: the shipped `themes/` directory.

use std::path::{Path, PathBuf};

use crate::error::{Result, SoundsError};

/// Bundle of every path used by the installer.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root of the Claude config tree (normally `~/.claude`).
    pub claude_dir: PathBuf,
    /// Installed sound files, one subdirectory per hook category.
    pub sounds_dir: PathBuf,
    /// Hook scripts (`play-sound.sh`).
    pub hooks_dir: PathBuf,
    /// Slash command markdown files.
    pub commands_dir: PathBuf,
    /// Claude Code `settings.json`.
    pub settings_path: PathBuf,
    /// Install state file (`.installed.json` inside the sounds dir).
    pub installed_path: PathBuf,
    /// Shipped theme packs.
    pub themes_dir: PathBuf,
    /// Package root (parent of `themes/`).
    pub pkg_dir: PathBuf,
}

impl Paths {
    /// Build the full path bundle from a Claude config dir and a package dir.
    pub fn new(claude_dir: impl Into<PathBuf>, pkg_dir: impl Into<PathBuf>) -> Self {
        let claude_dir = claude_dir.into();
        let pkg_dir = pkg_dir.into();
        let sounds_dir = claude_dir.join("sounds");
        Self {
            hooks_dir: claude_dir.join("hooks"),
            commands_dir: claude_dir.join("commands"),
            settings_path: claude_dir.join("settings.json"),
            installed_path: sounds_dir.join(".installed.json"),
            themes_dir: pkg_dir.join("themes"),
            sounds_dir,
            claude_dir,
            pkg_dir,
        }
    }

    /// Default paths: `~/.claude` plus the package dir next to the binary.
    pub fn default_paths() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| SoundsError::Other("cannot determine home directory".to_string()))?;
        Ok(Self::new(home.join(".claude"), default_pkg_dir()))
    }

    /// Marker file signalling muted playback.
    pub fn mute_marker(&self) -> PathBuf {
        self.sounds_dir.join(".muted")
    }

    /// Marker file signalling do-not-disturb (contains the process watchlist).
    pub fn dnd_marker(&self) -> PathBuf {
        self.sounds_dir.join(".dnd")
    }

    /// Source location of a theme's sound file: `themes/<theme>/sounds/<file>`.
    pub fn theme_sound_path(&self, theme_name: &str, file_name: &str) -> PathBuf {
        self.themes_dir.join(theme_name).join("sounds").join(file_name)
    }

    /// Directory of a single theme pack.
    pub fn theme_dir(&self, theme_name: &str) -> PathBuf {
        self.themes_dir.join(theme_name)
    }
}

/// Resolve the package dir: `CLAUDE_SOUNDS_HOME` env var, then the
/// executable's directory, then the current dir.
fn default_pkg_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CLAUDE_SOUNDS_HOME") {
        return PathBuf::from(dir);
    }
    if let Ok(exe) = std::env::current_exe() {
        if let Some(parent) = exe.parent() {
            return parent.to_path_buf();
        }
    }
    PathBuf::from(".")
}

/// True when `name` looks like an installable sound file.
pub fn is_sound_file(name: &str) -> bool {
    name.ends_with(".wav") || name.ends_with(".mp3")
}

/// Count sound files directly inside `dir` (0 if it doesn't exist).
pub fn count_sound_files(dir: &Path) -> usize {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return 0;
    };
    entries
        .flatten()
        .filter(|e| e.file_name().to_str().is_some_and(is_sound_file))
        .count()
}
