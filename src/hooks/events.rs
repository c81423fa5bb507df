//! The fixed set of lifecycle hook categories.
//!
//! Exactly 11 categories exist. Each owns a subdirectory of the sounds
//! dir, a unique 3-character abbreviation for compact display, and a
//! description shown during customization.

/// A lifecycle event that can trigger a sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HookCategory {
    /// Session starting.
    Start,
    /// User submitted a prompt.
    Prompt,
    /// Permission prompt shown.
    Permission,
    /// Done responding.
    Stop,
    /// Spawning a subagent.
    Subagent,
    /// Task finished.
    TaskCompleted,
    /// Tool failure.
    Error,
    /// Context compaction.
    Compact,
    /// Waiting for input.
    Idle,
    /// Teammate went idle.
    TeammateIdle,
    /// Session over.
    End,
}

impl HookCategory {
    /// Every category, in display order.
    pub const ALL: [HookCategory; 11] = [
        Self::Start,
        Self::Prompt,
        Self::Permission,
        Self::Stop,
        Self::Subagent,
        Self::TaskCompleted,
        Self::Error,
        Self::Compact,
        Self::Idle,
        Self::TeammateIdle,
        Self::End,
    ];

    /// Canonical key — also the sound subdirectory name and the argument
    /// passed to the playback script.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Prompt => "prompt",
            Self::Permission => "permission",
            Self::Stop => "stop",
            Self::Subagent => "subagent",
            Self::TaskCompleted => "task-completed",
            Self::Error => "error",
            Self::Compact => "compact",
            Self::Idle => "idle",
            Self::TeammateIdle => "teammate-idle",
            Self::End => "end",
        }
    }

    /// Unique 3-character abbreviation.
    pub fn abbr(&self) -> &'static str {
        match self {
            Self::Start => "str",
            Self::Prompt => "pmt",
            Self::Permission => "prm",
            Self::Stop => "stp",
            Self::Subagent => "sub",
            Self::TaskCompleted => "tsk",
            Self::Error => "err",
            Self::Compact => "cmp",
            Self::Idle => "idl",
            Self::TeammateIdle => "tmt",
            Self::End => "end",
        }
    }

    /// Human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Start => "Session starting",
            Self::Prompt => "User submitted prompt",
            Self::Permission => "Permission prompt",
            Self::Stop => "Done responding",
            Self::Subagent => "Spawning subagent",
            Self::TaskCompleted => "Task finished",
            Self::Error => "Tool failure",
            Self::Compact => "Context compaction",
            Self::Idle => "Waiting for input",
            Self::TeammateIdle => "Teammate went idle",
            Self::End => "Session over",
        }
    }

    /// Parse from a loose string (case-insensitive, underscores accepted).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "start" => Some(Self::Start),
            "prompt" => Some(Self::Prompt),
            "permission" => Some(Self::Permission),
            "stop" => Some(Self::Stop),
            "subagent" => Some(Self::Subagent),
            "task-completed" => Some(Self::TaskCompleted),
            "error" => Some(Self::Error),
            "compact" => Some(Self::Compact),
            "idle" => Some(Self::Idle),
            "teammate-idle" => Some(Self::TeammateIdle),
            "end" => Some(Self::End),
            _ => None,
        }
    }
}

impl std::fmt::Display for HookCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
