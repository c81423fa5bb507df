//! Data structures for the `theme.json` descriptor.
//!
//! A theme pack is a directory containing a descriptor plus a `sounds/`
//! directory with the actual audio files. The descriptor maps hook
//! categories to the files that should play for them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Parsed `theme.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeDescriptor {
    /// Display name ("Warcraft III Peon"). Falls back to the directory
    /// name when empty.
    #[serde(default)]
    pub name: String,

    /// One-line description shown in listings.
    #[serde(default)]
    pub description: String,

    /// Where the audio originally came from (URLs, attribution).
    #[serde(default)]
    pub sources: Vec<String>,

    /// Hook category → sounds for that category.
    #[serde(default)]
    pub sounds: BTreeMap<String, CategorySounds>,
}

impl ThemeDescriptor {
    /// Total number of sound files across all categories.
    pub fn sound_count(&self) -> usize {
        self.sounds.values().map(|c| c.files.len()).sum()
    }
}

/// The sounds a theme assigns to one hook category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySounds {
    /// What this category means, for the customize prompt.
    #[serde(default)]
    pub description: String,

    /// Files to install for this category (all of them in a quick install).
    #[serde(default)]
    pub files: Vec<SoundFile>,
}

/// One audio file within a theme.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundFile {
    /// Filename inside the theme's `sounds/` directory (`.wav` or `.mp3`).
    pub name: String,

    /// Upstream source reference used by the theme's download script.
    #[serde(default)]
    pub src: String,

    /// Optional per-file description.
    #[serde(default)]
    pub description: String,
}
