//! Interactive installer UX — banner, dependency checklist, prompts, and
//! the post-install summary.
//!
//! Every prompt returns `Ok(None)` when the user cancels (Esc/q), so the
//! caller can exit cleanly without mutating further state.

use std::collections::BTreeMap;
use std::time::Duration;

use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, MultiSelect, Select};
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::preview::PreviewPlayer;
use crate::error::Result;
use crate::hooks::events::HookCategory;
use crate::install::{InstallOutcome, Selection, SoundSelection};
use crate::paths::Paths;
use crate::themes::registry::ThemeSummary;
use crate::themes::schema::ThemeDescriptor;

/// Print the banner shown before interactive installs.
pub fn print_banner() {
    println!();
    println!("  {}", style("claude-code-sounds").white().bold());
    println!("  {}", style("──────────────────────────────").dim());
    println!();
}

/// Print the dependency checklist: a green check per found binary, a red
/// cross per missing one.
pub fn print_dependency_check(required: &[&str], missing: &[&str]) {
    println!("  Checking dependencies...");
    for dep in required {
        if missing.contains(dep) {
            let note = if *dep == "afplay" { " (macOS only)" } else { "" };
            println!("    {} {dep} — required{note}", style("✗").red());
        } else {
            println!("    {} {dep}", style("✓").green());
        }
    }
    println!();
}

/// Create a spinner for the download step.
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let spinner_style = ProgressStyle::default_spinner()
        .template("  {spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(spinner_style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Y/n confirmation. Returns the default without prompting when
/// `non_interactive` is set; `None` means the user cancelled.
pub fn confirm(message: &str, default_yes: bool, non_interactive: bool) -> Result<Option<bool>> {
    if non_interactive {
        return Ok(Some(default_yes));
    }
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(message)
        .default(default_yes)
        .interact_opt()?)
}

/// Single-theme picker. `None` on cancel.
pub fn select_theme(themes: &[ThemeSummary]) -> Result<Option<usize>> {
    let labels: Vec<String> = themes
        .iter()
        .map(|t| format!("{} — {} ({} sounds)", t.display, t.description, t.sound_count))
        .collect();
    Ok(Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select a theme")
        .items(&labels)
        .default(0)
        .interact_opt()?)
}

/// Multi-theme picker for mix installs. `None` on cancel; an empty pick
/// is returned as-is for the caller to reject.
pub fn select_themes(themes: &[ThemeSummary]) -> Result<Option<Vec<usize>>> {
    let labels: Vec<String> = themes
        .iter()
        .map(|t| format!("{} — {} ({} sounds)", t.display, t.description, t.sound_count))
        .collect();
    let defaults = vec![false; themes.len()];
    Ok(MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Select themes to mix")
        .items(&labels)
        .defaults(&defaults)
        .interact_opt()?)
}

/// "Customize sounds for each hook?" — `Some(true)` means pick per hook.
pub fn wants_customization() -> Result<Option<bool>> {
    let options = [
        "No, use defaults — recommended",
        "Yes, let me pick — choose sounds per hook",
    ];
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Customize sounds for each hook?")
        .items(&options)
        .default(0)
        .interact_opt()?;
    Ok(choice.map(|idx| idx == 1))
}

// ---------------------------------------------------------------------------
// Customization
// ---------------------------------------------------------------------------

/// One auditionable/selectable file during customization.
struct CandidateFile {
    theme_name: String,
    file_name: String,
    label: String,
}

/// Walk every hook category and let the user pick files from the chosen
/// themes. Returns `None` on cancel at any point.
///
/// When `preview` is set, each category offers a listen-first loop before
/// the selection prompt.
pub fn customize_selection(
    themes: &[(String, ThemeDescriptor)],
    paths: &Paths,
    preview: bool,
) -> Result<Option<Selection>> {
    let mut player = PreviewPlayer::new();
    let mut selection = Selection::new();

    for category in HookCategory::ALL {
        let candidates = candidates_for(themes, category.as_str());
        if candidates.is_empty() {
            continue;
        }

        println!(
            "  {} {}",
            style(category.as_str()).bold(),
            style(format!("— {}", category.description())).dim()
        );

        if preview {
            preview_loop(&mut player, &candidates, paths)?;
        }

        let labels: Vec<&str> = candidates.iter().map(|c| c.label.as_str()).collect();
        let defaults = vec![true; candidates.len()];
        let Some(picked) = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Sounds for {}", category.as_str()))
            .items(&labels)
            .defaults(&defaults)
            .interact_opt()?
        else {
            player.stop();
            return Ok(None);
        };

        let items: Vec<SoundSelection> = picked
            .into_iter()
            .map(|idx| SoundSelection {
                theme_name: candidates[idx].theme_name.clone(),
                file_name: candidates[idx].file_name.clone(),
            })
            .collect();
        selection.insert(category.as_str().to_string(), items);
    }

    player.stop();
    Ok(Some(selection))
}

/// Pool a category's files across the chosen themes. With more than one
/// theme, labels are prefixed by the theme name.
fn candidates_for(themes: &[(String, ThemeDescriptor)], category: &str) -> Vec<CandidateFile> {
    let multi = themes.len() > 1;
    let mut out = Vec::new();
    for (theme_name, descriptor) in themes {
        let Some(sounds) = descriptor.sounds.get(category) else {
            continue;
        };
        for file in &sounds.files {
            let stem = file
                .name
                .trim_end_matches(".wav")
                .trim_end_matches(".mp3");
            let label = if multi {
                format!("{theme_name}/{stem}")
            } else {
                stem.to_string()
            };
            out.push(CandidateFile {
                theme_name: theme_name.clone(),
                file_name: file.name.clone(),
                label,
            });
        }
    }
    out
}

/// Listen-first loop: a Select over the category's files plus a final
/// "Done listening" entry. Picking a file plays it (replacing whatever
/// preview was still running); picking Done or cancelling moves on.
fn preview_loop(
    player: &mut PreviewPlayer,
    candidates: &[CandidateFile],
    paths: &Paths,
) -> Result<()> {
    let mut labels: Vec<String> = candidates.iter().map(|c| format!("▶ {}", c.label)).collect();
    labels.push("Done listening".to_string());

    loop {
        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Preview")
            .items(&labels)
            .default(labels.len() - 1)
            .interact_opt()?;
        match choice {
            Some(idx) if idx < candidates.len() => {
                let c = &candidates[idx];
                player.play(&paths.theme_sound_path(&c.theme_name, &c.file_name));
            }
            _ => {
                player.stop();
                return Ok(());
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Print the post-install summary: per-category counts, then totals.
pub fn print_summary(
    selection: &Selection,
    available: &BTreeMap<String, usize>,
    outcome: InstallOutcome,
) {
    println!();
    println!("  {} Installed! Here's what you'll hear:", style("✓").green());
    println!("  {}", style("─────────────────────────────────────").dim());

    for category in HookCategory::ALL {
        let key = category.as_str();
        let Some(items) = selection.get(key) else {
            continue;
        };
        let count = items.len();
        let avail = available.get(key).copied().unwrap_or(count);
        let suffix = if count < avail {
            format!(" ({count}/{avail})")
        } else {
            format!(" ({count})")
        };
        println!(
            "    {key}{suffix} {}",
            style(format!("— {}", category.description())).dim()
        );
    }

    println!();
    println!(
        "  {} sound files across {} events.",
        outcome.total, outcome.categories
    );
    println!("  Start a new Claude Code session to hear it!");
    println!();
}
