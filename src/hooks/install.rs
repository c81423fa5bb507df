//! Hook configuration — writes the playback script and wires it into
//! Claude Code's `settings.json`.
//!
//! Three operations:
//!
//! 1. **Playback script** — Writes the shared `play-sound.sh` (embedded in
//!    the binary) into `<claude_dir>/hooks/` and marks it executable.
//! 2. **`settings.json`** — Replaces the `"hooks"` key with the fixed
//!    event mapping. Keys outside `"hooks"` are preserved verbatim.
//! 3. **Slash commands** — Installs `/mute`, `/unmute`, and `/dnd`
//!    markdown commands into `<claude_dir>/commands/`.
//!
//! [`uninstall_all`] reverses all of it and reports what was actually
//! present.

use std::fs;
use std::os::unix::fs::PermissionsExt;

use serde_json::{json, Map, Value};
use tracing::info;

use crate::error::Result;
use crate::paths::Paths;
use crate::state::store::write_json_atomic;

/// Filename of the shared playback script.
pub const PLAY_SOUND_SCRIPT: &str = "play-sound.sh";

/// The playback script itself. Honors the `.muted` and `.dnd` markers,
/// picks a random sound from the category directory, plays via `afplay`.
const PLAY_SOUND_BODY: &str = r#"#!/usr/bin/env bash
# claude-code-sounds playback hook.
# Usage: play-sound.sh <category>

CATEGORY="$1"
SOUNDS_DIR="$HOME/.claude/sounds"

[ -n "$CATEGORY" ] || exit 0
[ -f "$SOUNDS_DIR/.muted" ] && exit 0

if [ -f "$SOUNDS_DIR/.dnd" ]; then
  while IFS= read -r proc; do
    [ -n "$proc" ] && pgrep -xq "$proc" && exit 0
  done < "$SOUNDS_DIR/.dnd"
fi

DIR="$SOUNDS_DIR/$CATEGORY"
[ -d "$DIR" ] || exit 0

FILE=$(find "$DIR" -maxdepth 1 \( -name '*.wav' -o -name '*.mp3' \) 2>/dev/null | sort -R | head -n 1)
[ -n "$FILE" ] || exit 0

exec afplay "$FILE" >/dev/null 2>&1
"#;

/// Slash commands installed alongside the hooks.
const SLASH_COMMANDS: &[(&str, &str)] = &[
    (
        "mute.md",
        "---\ndescription: Mute Claude Code sounds\n---\n\n\
         Run `touch ~/.claude/sounds/.muted` with the Bash tool, then tell \
         the user sounds are muted until they run /unmute.\n",
    ),
    (
        "unmute.md",
        "---\ndescription: Unmute Claude Code sounds\n---\n\n\
         Run `rm -f ~/.claude/sounds/.muted` with the Bash tool, then tell \
         the user sounds are back on.\n",
    ),
    (
        "dnd.md",
        "---\ndescription: Toggle do-not-disturb for Claude Code sounds\n---\n\n\
         If `~/.claude/sounds/.dnd` exists, remove it and tell the user DND \
         is off. Otherwise run `claude-code-sounds --dnd` with the Bash tool \
         and tell the user sounds will stay quiet during meetings.\n",
    ),
];

/// Hook timeout in seconds, applied to every command.
const HOOK_TIMEOUT: u64 = 5;

// ---------------------------------------------------------------------------
// Hooks config
// ---------------------------------------------------------------------------

/// One hook command entry.
fn command_entry(category: &str) -> Value {
    json!({
        "type": "command",
        "command": format!(r#"/bin/bash "$HOME/.claude/hooks/{PLAY_SOUND_SCRIPT}" {category}"#),
        "timeout": HOOK_TIMEOUT,
    })
}

/// Build the value written to the `"hooks"` key of `settings.json`:
/// 10 lifecycle events mapped to playback script invocations. The two
/// Notification matchers route the permission and idle categories.
pub fn build_hooks_value() -> Value {
    json!({
        "SessionStart": [{"matcher": "startup", "hooks": [command_entry("start")]}],
        "SessionEnd": [{"hooks": [command_entry("end")]}],
        "Notification": [
            {"matcher": "permission_prompt", "hooks": [command_entry("permission")]},
            {"matcher": "idle_prompt", "hooks": [command_entry("idle")]},
        ],
        "Stop": [{"hooks": [command_entry("stop")]}],
        "SubagentStart": [{"hooks": [command_entry("subagent")]}],
        "PostToolUseFailure": [{"hooks": [command_entry("error")]}],
        "UserPromptSubmit": [{"hooks": [command_entry("prompt")]}],
        "TaskCompleted": [{"hooks": [command_entry("task-completed")]}],
        "PreCompact": [{"hooks": [command_entry("compact")]}],
        "TeammateIdle": [{"hooks": [command_entry("teammate-idle")]}],
    })
}

// ---------------------------------------------------------------------------
// settings.json
// ---------------------------------------------------------------------------

/// Read `settings.json` as a JSON object, treating a missing or corrupt
/// file as an empty object.
pub fn read_settings(paths: &Paths) -> Value {
    match fs::read_to_string(&paths.settings_path) {
        Ok(contents) => serde_json::from_str(&contents)
            .ok()
            .filter(Value::is_object)
            .unwrap_or_else(|| Value::Object(Map::new())),
        Err(_) => Value::Object(Map::new()),
    }
}

/// Write `settings.json` atomically, creating the Claude dir if needed.
pub fn write_settings(settings: &Value, paths: &Paths) -> Result<()> {
    fs::create_dir_all(&paths.claude_dir)?;
    write_json_atomic(&paths.settings_path, settings)
}

// ---------------------------------------------------------------------------
// Install
// ---------------------------------------------------------------------------

/// Install the playback script, the hooks config, and the slash commands.
///
/// Idempotent: running it twice produces the same result. The `"hooks"`
/// key of settings is replaced wholesale; every other key is preserved.
pub fn install_hooks_config(paths: &Paths) -> Result<()> {
    fs::create_dir_all(&paths.hooks_dir)?;

    let script_path = paths.hooks_dir.join(PLAY_SOUND_SCRIPT);
    fs::write(&script_path, PLAY_SOUND_BODY)?;
    fs::set_permissions(&script_path, fs::Permissions::from_mode(0o755))?;
    info!(path = %script_path.display(), "installed playback script");

    let mut settings = read_settings(paths);
    if let Some(map) = settings.as_object_mut() {
        map.insert("hooks".to_string(), build_hooks_value());
    }
    write_settings(&settings, paths)?;
    info!(path = %paths.settings_path.display(), "wrote hooks config");

    fs::create_dir_all(&paths.commands_dir)?;
    for (name, body) in SLASH_COMMANDS {
        fs::write(paths.commands_dir.join(name), body)?;
    }
    info!(count = SLASH_COMMANDS.len(), "installed slash commands");

    Ok(())
}

// ---------------------------------------------------------------------------
// Uninstall
// ---------------------------------------------------------------------------

/// Which artifacts an uninstall actually found and deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Removed {
    /// The sounds directory (including markers and install state).
    pub sounds: bool,
    /// The playback script.
    pub hook_script: bool,
    /// The `"hooks"` key of `settings.json`.
    pub hooks_config: bool,
    /// Any of our slash commands.
    pub commands: bool,
}

impl Removed {
    /// True when nothing at all was found to remove.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Remove every installed artifact, reporting which were present.
///
/// Settings keys other than `"hooks"` are preserved; the commands
/// directory itself is left in place since it may hold unrelated commands.
pub fn uninstall_all(paths: &Paths) -> Result<Removed> {
    let mut removed = Removed::default();

    if paths.sounds_dir.exists() {
        fs::remove_dir_all(&paths.sounds_dir)?;
        removed.sounds = true;
    }

    let script_path = paths.hooks_dir.join(PLAY_SOUND_SCRIPT);
    if script_path.exists() {
        fs::remove_file(&script_path)?;
        removed.hook_script = true;
    }

    if paths.settings_path.exists() {
        let mut settings = read_settings(paths);
        if let Some(map) = settings.as_object_mut() {
            if map.remove("hooks").is_some() {
                write_settings(&settings, paths)?;
                removed.hooks_config = true;
            }
        }
    }

    for (name, _) in SLASH_COMMANDS {
        let path = paths.commands_dir.join(name);
        if path.exists() {
            fs::remove_file(&path)?;
            removed.commands = true;
        }
    }

    Ok(removed)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
