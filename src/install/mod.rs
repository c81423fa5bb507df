//! Sound installation — turning a selection into files on disk.
//!
//! A selection maps hook categories to the theme files that should play
//! for them. Installing is destructive per category: whatever sound files
//! were there before are removed, then the selected files are copied in.
//! The selection itself is never persisted; only the copied files and the
//! install state are.

use std::collections::BTreeMap;
use std::fs;
use std::process::Command;

use tracing::{debug, warn};

use crate::error::{Result, SoundsError};
use crate::hooks::install::install_hooks_config;
use crate::paths::{is_sound_file, Paths};
use crate::state::store::{write_install_state, InstallMode, InstallState};
use crate::themes::registry::load_theme;
use crate::themes::schema::ThemeDescriptor;

/// One chosen sound file: which theme it comes from and its filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundSelection {
    pub theme_name: String,
    pub file_name: String,
}

/// Hook category → chosen files. Built transiently during install.
pub type Selection = BTreeMap<String, Vec<SoundSelection>>;

/// Summary of a completed install.
#[derive(Debug, Clone, Copy)]
pub struct InstallOutcome {
    /// Files actually copied (selected minus missing sources).
    pub total: usize,
    /// Hook categories touched.
    pub categories: usize,
}

/// External binaries the installer needs. `afplay` is the audio player
/// (macOS); `curl` and `unzip` serve the theme download scripts.
pub const REQUIRED_DEPS: &[&str] = &["afplay", "curl", "unzip"];

// ---------------------------------------------------------------------------
// Core copy loop
// ---------------------------------------------------------------------------

/// Install a selection: per category, ensure the destination directory,
/// clear prior sound files, copy each selected file from its theme.
///
/// Returns the number of files actually copied. A missing source file is
/// warned and skipped, never fatal.
pub fn install_sounds(selection: &Selection, paths: &Paths) -> Result<usize> {
    let mut total = 0;

    for (category, items) in selection {
        let cat_dir = paths.sounds_dir.join(category);
        fs::create_dir_all(&cat_dir)?;
        clear_sound_files(&cat_dir)?;

        for item in items {
            let src = paths.theme_sound_path(&item.theme_name, &item.file_name);
            if !src.exists() {
                warn!(
                    theme = %item.theme_name,
                    file = %item.file_name,
                    "source file missing, skipping"
                );
                continue;
            }
            fs::copy(&src, cat_dir.join(&item.file_name))?;
            total += 1;
        }
        debug!(category = %category, "category installed");
    }

    Ok(total)
}

/// Remove every `.wav`/`.mp3` directly inside `dir`.
fn clear_sound_files(dir: &std::path::Path) -> Result<()> {
    for entry in fs::read_dir(dir)?.flatten() {
        if entry.file_name().to_str().is_some_and(is_sound_file) {
            fs::remove_file(entry.path())?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Quick / custom installs
// ---------------------------------------------------------------------------

/// A theme's default selection: every file of every category.
pub fn default_selection(theme_name: &str, theme: &ThemeDescriptor) -> Selection {
    theme
        .sounds
        .iter()
        .map(|(category, sounds)| {
            let items = sounds
                .files
                .iter()
                .map(|f| SoundSelection {
                    theme_name: theme_name.to_string(),
                    file_name: f.name.clone(),
                })
                .collect();
            (category.clone(), items)
        })
        .collect()
}

/// Quick install: one theme, default mapping. Installs the sounds, records
/// the install state, and wires up the hooks config.
pub fn quick_install(theme_name: &str, paths: &Paths) -> Result<InstallOutcome> {
    let theme = load_theme(theme_name, paths)?;
    let selection = default_selection(theme_name, &theme);
    let categories = selection.len();

    let total = install_sounds(&selection, paths)?;
    let state = InstallState {
        themes: vec![theme_name.to_string()],
        mode: InstallMode::Quick,
    };
    write_install_state(&state, paths)?;
    install_hooks_config(paths)?;

    Ok(InstallOutcome { total, categories })
}

/// Default selection across several themes: every file of every category
/// of each theme, pooled per category. Used when mixing without
/// customization.
pub fn merged_default_selection(themes: &[(String, ThemeDescriptor)]) -> Selection {
    let mut selection = Selection::new();
    for (name, theme) in themes {
        for (category, items) in default_selection(name, theme) {
            selection.entry(category).or_default().extend(items);
        }
    }
    selection
}

/// Custom install: a user-assembled selection, possibly spanning several
/// themes. Records mode `custom`.
pub fn custom_install(
    selection: &Selection,
    theme_names: Vec<String>,
    paths: &Paths,
) -> Result<InstallOutcome> {
    let categories = selection.len();
    let total = install_sounds(selection, paths)?;
    let state = InstallState {
        themes: theme_names,
        mode: InstallMode::Custom,
    };
    write_install_state(&state, paths)?;
    install_hooks_config(paths)?;

    Ok(InstallOutcome { total, categories })
}

// ---------------------------------------------------------------------------
// Asset download
// ---------------------------------------------------------------------------

/// Make sure a theme's referenced sound files exist on disk, running the
/// theme's `download.sh` once if any are missing.
///
/// The script is all-or-nothing: a non-zero exit aborts the run. Files
/// still missing afterwards are handled (warned, skipped) by the copy loop.
pub fn ensure_theme_assets(theme_name: &str, theme: &ThemeDescriptor, paths: &Paths) -> Result<()> {
    let sounds_dir = paths.theme_dir(theme_name).join("sounds");
    let all_present = theme.sounds.values().flat_map(|c| &c.files).all(|f| {
        sounds_dir.join(&f.name).exists()
    });
    if all_present {
        debug!(theme = %theme_name, "assets already present");
        return Ok(());
    }

    let script = paths.theme_dir(theme_name).join("download.sh");
    if !script.exists() {
        warn!(theme = %theme_name, "assets missing and no download.sh");
        return Ok(());
    }

    let status = Command::new("bash")
        .arg(&script)
        .arg(&sounds_dir)
        .current_dir(paths.theme_dir(theme_name))
        .status()?;

    if !status.success() {
        return Err(SoundsError::Download(format!(
            "{} exited with {}",
            script.display(),
            status
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Dependency check
// ---------------------------------------------------------------------------

/// Names from [`REQUIRED_DEPS`] that aren't on `PATH`.
pub fn missing_dependencies() -> Vec<&'static str> {
    REQUIRED_DEPS
        .iter()
        .copied()
        .filter(|dep| which::which(dep).is_err())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn make_paths(tmp: &TempDir) -> Paths {
        Paths::new(tmp.path().join(".claude"), tmp.path())
    }

    /// Write a theme dir with a descriptor and real (fake-content) sounds.
    fn write_theme_with_sounds(paths: &Paths, dir: &str, files: &[(&str, &str)]) {
        let theme_dir = paths.theme_dir(dir);
        let sounds_dir = theme_dir.join("sounds");
        fs::create_dir_all(&sounds_dir).unwrap();

        let mut sounds = serde_json::Map::new();
        for (category, file) in files {
            fs::write(sounds_dir.join(file), b"fake audio").unwrap();
            let entry = sounds
                .entry(category.to_string())
                .or_insert_with(|| serde_json::json!({"description": "d", "files": []}));
            entry["files"]
                .as_array_mut()
                .unwrap()
                .push(serde_json::json!({"name": file}));
        }
        let descriptor = serde_json::json!({
            "name": format!("Theme {dir}"),
            "description": "test theme",
            "sounds": sounds,
        });
        fs::write(
            theme_dir.join("theme.json"),
            serde_json::to_string_pretty(&descriptor).unwrap(),
        )
        .unwrap();
    }

    fn pick(theme: &str, file: &str) -> SoundSelection {
        SoundSelection {
            theme_name: theme.to_string(),
            file_name: file.to_string(),
        }
    }

    // -- install_sounds -----------------------------------------------------

    #[test]
    fn copies_files_into_category_dirs() {
        let tmp = TempDir::new().unwrap();
        let paths = make_paths(&tmp);
        write_theme_with_sounds(&paths, "wc3-peon", &[("start", "ready-to-work.mp3")]);

        let mut selection = Selection::new();
        selection.insert("start".to_string(), vec![pick("wc3-peon", "ready-to-work.mp3")]);

        let total = install_sounds(&selection, &paths).unwrap();
        assert_eq!(total, 1);
        assert!(paths.sounds_dir.join("start/ready-to-work.mp3").exists());
    }

    #[test]
    fn clears_existing_sounds_before_copying() {
        let tmp = TempDir::new().unwrap();
        let paths = make_paths(&tmp);
        write_theme_with_sounds(
            &paths,
            "wc3-peon",
            &[("start", "ready-to-work.mp3"), ("start", "something-need-doing.mp3")],
        );

        let mut first = Selection::new();
        first.insert("start".to_string(), vec![pick("wc3-peon", "ready-to-work.mp3")]);
        install_sounds(&first, &paths).unwrap();

        let mut second = Selection::new();
        second.insert(
            "start".to_string(),
            vec![pick("wc3-peon", "something-need-doing.mp3")],
        );
        install_sounds(&second, &paths).unwrap();

        let remaining: Vec<String> = fs::read_dir(paths.sounds_dir.join("start"))
            .unwrap()
            .flatten()
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|n| is_sound_file(n))
            .collect();
        assert_eq!(remaining, vec!["something-need-doing.mp3"]);
    }

    #[test]
    fn counts_across_categories() {
        let tmp = TempDir::new().unwrap();
        let paths = make_paths(&tmp);
        write_theme_with_sounds(
            &paths,
            "wc3-peon",
            &[
                ("start", "a.mp3"),
                ("start", "b.mp3"),
                ("end", "c.mp3"),
            ],
        );

        let mut selection = Selection::new();
        selection.insert(
            "start".to_string(),
            vec![pick("wc3-peon", "a.mp3"), pick("wc3-peon", "b.mp3")],
        );
        selection.insert("end".to_string(), vec![pick("wc3-peon", "c.mp3")]);

        assert_eq!(install_sounds(&selection, &paths).unwrap(), 3);
    }

    #[test]
    fn empty_selection_installs_nothing() {
        let tmp = TempDir::new().unwrap();
        let paths = make_paths(&tmp);
        assert_eq!(install_sounds(&Selection::new(), &paths).unwrap(), 0);
    }

    #[test]
    fn missing_sources_are_skipped_not_fatal() {
        let tmp = TempDir::new().unwrap();
        let paths = make_paths(&tmp);

        let mut selection = Selection::new();
        selection.insert("start".to_string(), vec![pick("wc3-peon", "nonexistent.wav")]);

        assert_eq!(install_sounds(&selection, &paths).unwrap(), 0);
    }

    #[test]
    fn non_sound_files_survive_the_clear() {
        let tmp = TempDir::new().unwrap();
        let paths = make_paths(&tmp);
        write_theme_with_sounds(&paths, "t", &[("start", "a.mp3")]);

        let cat_dir = paths.sounds_dir.join("start");
        fs::create_dir_all(&cat_dir).unwrap();
        fs::write(cat_dir.join("notes.txt"), b"keep me").unwrap();

        let mut selection = Selection::new();
        selection.insert("start".to_string(), vec![pick("t", "a.mp3")]);
        install_sounds(&selection, &paths).unwrap();

        assert!(cat_dir.join("notes.txt").exists());
    }

    // -- default_selection / quick_install ----------------------------------

    #[test]
    fn default_selection_takes_every_file() {
        let theme: ThemeDescriptor = serde_json::from_str(
            r#"{
                "sounds": {
                    "start": {"files": [{"name": "a.wav"}, {"name": "b.wav"}]},
                    "end": {"files": [{"name": "c.wav"}]}
                }
            }"#,
        )
        .unwrap();

        let selection = default_selection("mine", &theme);
        assert_eq!(selection.len(), 2);
        assert_eq!(selection["start"].len(), 2);
        assert_eq!(selection["end"], vec![pick("mine", "c.wav")]);
    }

    #[test]
    fn quick_install_wires_everything_up() {
        let tmp = TempDir::new().unwrap();
        let paths = make_paths(&tmp);
        write_theme_with_sounds(
            &paths,
            "wc3-peon",
            &[("start", "a.mp3"), ("end", "b.mp3")],
        );

        let outcome = quick_install("wc3-peon", &paths).unwrap();
        assert_eq!(outcome.total, 2);
        assert_eq!(outcome.categories, 2);

        let state = crate::state::store::read_install_state(&paths).unwrap();
        assert_eq!(state.themes, vec!["wc3-peon"]);
        assert_eq!(state.mode, InstallMode::Quick);

        let settings = crate::hooks::install::read_settings(&paths);
        assert!(settings["hooks"].is_object());
        assert!(paths
            .hooks_dir
            .join(crate::hooks::install::PLAY_SOUND_SCRIPT)
            .exists());
        assert!(paths.sounds_dir.join("start/a.mp3").exists());
    }

    #[test]
    fn quick_install_unknown_theme_fails() {
        let tmp = TempDir::new().unwrap();
        let paths = make_paths(&tmp);
        assert!(matches!(
            quick_install("ghost", &paths),
            Err(SoundsError::ThemeNotFound(_))
        ));
    }

    #[test]
    fn merged_defaults_pool_categories_across_themes() {
        let theme_a: ThemeDescriptor = serde_json::from_str(
            r#"{"sounds": {"start": {"files": [{"name": "a.wav"}]}}}"#,
        )
        .unwrap();
        let theme_b: ThemeDescriptor = serde_json::from_str(
            r#"{
                "sounds": {
                    "start": {"files": [{"name": "b.wav"}]},
                    "end": {"files": [{"name": "c.wav"}]}
                }
            }"#,
        )
        .unwrap();

        let merged = merged_default_selection(&[
            ("one".to_string(), theme_a),
            ("two".to_string(), theme_b),
        ]);
        assert_eq!(merged["start"], vec![pick("one", "a.wav"), pick("two", "b.wav")]);
        assert_eq!(merged["end"], vec![pick("two", "c.wav")]);
    }

    #[test]
    fn merged_defaults_install_every_theme() {
        let tmp = TempDir::new().unwrap();
        let paths = make_paths(&tmp);
        write_theme_with_sounds(&paths, "one", &[("start", "a.mp3")]);
        write_theme_with_sounds(&paths, "two", &[("start", "b.mp3"), ("end", "c.mp3")]);

        let loaded = vec![
            ("one".to_string(), load_theme("one", &paths).unwrap()),
            ("two".to_string(), load_theme("two", &paths).unwrap()),
        ];
        let selection = merged_default_selection(&loaded);
        let theme_names = loaded.iter().map(|(name, _)| name.clone()).collect();
        let outcome = custom_install(&selection, theme_names, &paths).unwrap();

        assert_eq!(outcome.total, 3);
        assert!(paths.sounds_dir.join("start/a.mp3").exists());
        assert!(paths.sounds_dir.join("start/b.mp3").exists());
        assert!(paths.sounds_dir.join("end/c.mp3").exists());

        let state = crate::state::store::read_install_state(&paths).unwrap();
        assert_eq!(state.themes, vec!["one", "two"]);
        assert_eq!(state.mode, InstallMode::Custom);
    }

    #[test]
    fn custom_install_records_custom_mode() {
        let tmp = TempDir::new().unwrap();
        let paths = make_paths(&tmp);
        write_theme_with_sounds(&paths, "one", &[("start", "a.mp3")]);
        write_theme_with_sounds(&paths, "two", &[("end", "b.mp3")]);

        let mut selection = Selection::new();
        selection.insert("start".to_string(), vec![pick("one", "a.mp3")]);
        selection.insert("end".to_string(), vec![pick("two", "b.mp3")]);

        let outcome = custom_install(
            &selection,
            vec!["one".to_string(), "two".to_string()],
            &paths,
        )
        .unwrap();
        assert_eq!(outcome.total, 2);

        let state = crate::state::store::read_install_state(&paths).unwrap();
        assert_eq!(state.themes, vec!["one", "two"]);
        assert_eq!(state.mode, InstallMode::Custom);
    }

    // -- ensure_theme_assets -------------------------------------------------

    #[test]
    fn assets_present_skips_download() {
        let tmp = TempDir::new().unwrap();
        let paths = make_paths(&tmp);
        write_theme_with_sounds(&paths, "t", &[("start", "a.mp3")]);
        let theme = load_theme("t", &paths).unwrap();

        // No download.sh exists; must still succeed because assets are there.
        ensure_theme_assets("t", &theme, &paths).unwrap();
    }

    #[test]
    fn download_script_runs_when_assets_missing() {
        let tmp = TempDir::new().unwrap();
        let paths = make_paths(&tmp);
        write_theme_with_sounds(&paths, "t", &[("start", "a.mp3")]);
        // Remove the asset so the script has work to do.
        fs::remove_file(paths.theme_dir("t").join("sounds/a.mp3")).unwrap();

        let script = paths.theme_dir("t").join("download.sh");
        fs::write(&script, "#!/usr/bin/env bash\necho fetched > \"$1/a.mp3\"\n").unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        let theme = load_theme("t", &paths).unwrap();
        ensure_theme_assets("t", &theme, &paths).unwrap();
        assert!(paths.theme_dir("t").join("sounds/a.mp3").exists());
    }

    #[test]
    fn failing_download_script_aborts() {
        let tmp = TempDir::new().unwrap();
        let paths = make_paths(&tmp);
        write_theme_with_sounds(&paths, "t", &[("start", "a.mp3")]);
        fs::remove_file(paths.theme_dir("t").join("sounds/a.mp3")).unwrap();

        let script = paths.theme_dir("t").join("download.sh");
        fs::write(&script, "#!/usr/bin/env bash\nexit 1\n").unwrap();

        let theme = load_theme("t", &paths).unwrap();
        assert!(matches!(
            ensure_theme_assets("t", &theme, &paths),
            Err(SoundsError::Download(_))
        ));
    }

    #[test]
    fn missing_assets_without_script_is_tolerated() {
        let tmp = TempDir::new().unwrap();
        let paths = make_paths(&tmp);
        write_theme_with_sounds(&paths, "t", &[("start", "a.mp3")]);
        fs::remove_file(paths.theme_dir("t").join("sounds/a.mp3")).unwrap();

        let theme = load_theme("t", &paths).unwrap();
        // The copy loop will warn and skip; this stage must not fail.
        ensure_theme_assets("t", &theme, &paths).unwrap();
    }

    // -- dependencies --------------------------------------------------------

    #[test]
    fn missing_dependencies_is_a_subset_of_required() {
        for dep in missing_dependencies() {
            assert!(REQUIRED_DEPS.contains(&dep));
        }
    }
}
