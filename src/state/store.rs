//! Install state persistence.
//!
//! A single JSON file inside the sounds directory records which themes are
//! active and how they were installed. The file is overwritten wholesale on
//! each install; reads treat a missing or corrupt file as "no state".

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::paths::Paths;

/// How the active selection was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallMode {
    /// A theme's default file-to-category mapping.
    Quick,
    /// User-assigned mapping, possibly across themes.
    Custom,
}

impl InstallMode {
    /// Canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quick => "quick",
            Self::Custom => "custom",
        }
    }
}

impl std::fmt::Display for InstallMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted install state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallState {
    /// Directory names of the active themes.
    pub themes: Vec<String>,
    /// Install mode the selection came from.
    pub mode: InstallMode,
}

/// On-disk shape, including the legacy singular `theme` field.
#[derive(Deserialize)]
struct RawState {
    #[serde(default)]
    themes: Vec<String>,
    #[serde(default)]
    theme: Option<String>,
    #[serde(default)]
    mode: Option<InstallMode>,
}

/// Read the install state, returning `None` when the file is absent or
/// malformed. Corrupt JSON is "no state", not an error.
pub fn read_install_state(paths: &Paths) -> Option<InstallState> {
    let contents = fs::read_to_string(&paths.installed_path).ok()?;
    let raw: RawState = serde_json::from_str(&contents).ok()?;

    let themes = if raw.themes.is_empty() {
        raw.theme.map(|t| vec![t]).unwrap_or_default()
    } else {
        raw.themes
    };

    Some(InstallState {
        themes,
        mode: raw.mode.unwrap_or(InstallMode::Quick),
    })
}

/// Write the install state, creating the sounds directory if needed.
pub fn write_install_state(state: &InstallState, paths: &Paths) -> Result<()> {
    fs::create_dir_all(&paths.sounds_dir)?;
    write_json_atomic(&paths.installed_path, &serde_json::to_value(state)?)
}

/// Serialize `value` as pretty JSON and write it atomically: the bytes go
/// to a `.tmp` sibling first, then rename into place. A crash mid-write
/// leaves the previous file intact and no partial file behind.
pub fn write_json_atomic(path: &Path, value: &serde_json::Value) -> Result<()> {
    let mut contents = serde_json::to_string_pretty(value)?;
    contents.push('\n');

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
