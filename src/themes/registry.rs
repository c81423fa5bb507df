//! On-disk theme registry.
//!
//! Themes live as subdirectories of `themes/`, each with a `theme.json`
//! descriptor. Listing fails soft: a directory without a descriptor, or
//! with one that doesn't parse, is simply not a theme.

use std::fs;

use tracing::debug;

use crate::error::{Result, SoundsError};
use crate::paths::Paths;
use crate::themes::schema::ThemeDescriptor;

/// Listing entry for one theme pack.
#[derive(Debug, Clone)]
pub struct ThemeSummary {
    /// Directory name, used as the theme identifier.
    pub name: String,
    /// Display name from the descriptor (directory name when absent).
    pub display: String,
    /// One-line description.
    pub description: String,
    /// Total sound files across all categories.
    pub sound_count: usize,
    /// Attribution/source references.
    pub sources: Vec<String>,
}

/// List every valid theme pack, sorted by directory name.
///
/// Directories lacking a parseable `theme.json` are skipped silently.
/// A missing `themes/` directory yields an empty list.
pub fn list_themes(paths: &Paths) -> Vec<ThemeSummary> {
    let Ok(entries) = fs::read_dir(&paths.themes_dir) else {
        return Vec::new();
    };

    let mut themes: Vec<ThemeSummary> = entries
        .flatten()
        .filter_map(|entry| {
            let dir_name = entry.file_name().to_str()?.to_string();
            let descriptor = match read_descriptor(paths, &dir_name) {
                Some(d) => d,
                None => {
                    debug!(theme = %dir_name, "skipping: no valid theme.json");
                    return None;
                }
            };
            Some(summarize(&dir_name, &descriptor))
        })
        .collect();

    themes.sort_by(|a, b| a.name.cmp(&b.name));
    themes
}

/// Load one theme descriptor by directory name.
///
/// Unlike listing, this is a hard error: the caller asked for this theme
/// specifically, so a missing or corrupt descriptor must surface.
pub fn load_theme(name: &str, paths: &Paths) -> Result<ThemeDescriptor> {
    let path = paths.theme_dir(name).join("theme.json");
    let contents =
        fs::read_to_string(&path).map_err(|_| SoundsError::ThemeNotFound(name.to_string()))?;
    Ok(serde_json::from_str(&contents)?)
}

fn read_descriptor(paths: &Paths, dir_name: &str) -> Option<ThemeDescriptor> {
    let path = paths.theme_dir(dir_name).join("theme.json");
    let contents = fs::read_to_string(path).ok()?;
    serde_json::from_str(&contents).ok()
}

fn summarize(dir_name: &str, descriptor: &ThemeDescriptor) -> ThemeSummary {
    let display = if descriptor.name.is_empty() {
        dir_name.to_string()
    } else {
        descriptor.name.clone()
    };
    ThemeSummary {
        name: dir_name.to_string(),
        display,
        description: descriptor.description.clone(),
        sound_count: descriptor.sound_count(),
        sources: descriptor.sources.clone(),
    }
}
