//! Binary entry point: flag parsing and command dispatch.

use std::collections::BTreeMap;
use std::process::{self, Command};

use clap::Parser;
use console::style;

use claude_code_sounds::cli::installer;
use claude_code_sounds::error::{Result, SoundsError};
use claude_code_sounds::hooks::uninstall_all;
use claude_code_sounds::install::{
    custom_install, default_selection, ensure_theme_assets, merged_default_selection,
    missing_dependencies, quick_install, InstallOutcome, Selection, REQUIRED_DEPS,
};
use claude_code_sounds::observability::init_logging;
use claude_code_sounds::paths::Paths;
use claude_code_sounds::state::detect::detect_existing_install;
use claude_code_sounds::state::markers::{set_dnd, set_muted, DND_DEFAULTS};
use claude_code_sounds::themes::registry::{list_themes, load_theme, ThemeSummary};
use claude_code_sounds::themes::schema::ThemeDescriptor;

#[derive(Parser, Debug)]
#[command(
    name = "claude-code-sounds",
    version,
    about = "Themed sound packs for Claude Code hook events"
)]
struct Cli {
    /// List available themes and exit
    #[arg(short, long)]
    list: bool,

    /// Accept defaults, skip all prompts
    #[arg(short, long)]
    yes: bool,

    /// Remove installed sounds, hooks, and slash commands
    #[arg(long, alias = "remove")]
    uninstall: bool,

    /// Install a specific theme by directory name
    #[arg(short, long, value_name = "NAME")]
    theme: Option<String>,

    /// Mix sounds from several themes
    #[arg(short, long)]
    mix: bool,

    /// Silence playback without uninstalling
    #[arg(long)]
    mute: bool,

    /// Re-enable playback
    #[arg(long)]
    unmute: bool,

    /// Suppress playback while meeting apps are running
    #[arg(long)]
    dnd: bool,

    /// Turn do-not-disturb off
    #[arg(long)]
    no_dnd: bool,
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("{} {err}", style("error:").red().bold());
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let paths = Paths::default_paths()?;

    if cli.list {
        return cmd_list(&paths);
    }
    if cli.uninstall {
        return cmd_uninstall(&paths);
    }
    if cli.mute {
        return cmd_mute(true, &paths);
    }
    if cli.unmute {
        return cmd_mute(false, &paths);
    }
    if cli.dnd {
        return cmd_dnd(true, &paths);
    }
    if cli.no_dnd {
        return cmd_dnd(false, &paths);
    }
    cmd_install(cli, &paths)
}

// ---------------------------------------------------------------------------
// Simple commands
// ---------------------------------------------------------------------------

fn cmd_list(paths: &Paths) -> Result<()> {
    let themes = list_themes(paths);
    if themes.is_empty() {
        println!(
            "No themes found under {}",
            style(paths.themes_dir.display()).yellow()
        );
        return Ok(());
    }

    println!();
    println!("  Available themes:");
    for theme in &themes {
        println!(
            "    {} {} — {} ({} sounds)",
            style(&theme.name).cyan().bold(),
            style(format!("[{}]", theme.display)).dim(),
            theme.description,
            theme.sound_count
        );
        for source in &theme.sources {
            println!("      {}", style(source).dim());
        }
    }
    println!();
    Ok(())
}

fn cmd_uninstall(paths: &Paths) -> Result<()> {
    let removed = uninstall_all(paths)?;
    if removed.is_empty() {
        println!("Nothing to remove.");
        return Ok(());
    }

    let report = [
        (removed.sounds, "sound files"),
        (removed.hook_script, "playback script"),
        (removed.hooks_config, "hooks configuration"),
        (removed.commands, "slash commands"),
    ];
    println!();
    for (was_removed, label) in report {
        if was_removed {
            println!("  {} removed {label}", style("✓").green());
        } else {
            println!("  {} {label} (not present)", style("·").dim());
        }
    }
    println!();
    Ok(())
}

fn cmd_mute(muted: bool, paths: &Paths) -> Result<()> {
    set_muted(muted, paths)?;
    if muted {
        println!("Sounds muted. Run with --unmute to bring them back.");
    } else {
        println!("Sounds unmuted.");
    }
    Ok(())
}

fn cmd_dnd(enabled: bool, paths: &Paths) -> Result<()> {
    set_dnd(enabled, paths)?;
    if enabled {
        println!("Do-not-disturb on. Playback pauses while any of these run:");
        for app in DND_DEFAULTS {
            println!("  {}", style(app).dim());
        }
    } else {
        println!("Do-not-disturb off.");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Install flow
// ---------------------------------------------------------------------------

fn cmd_install(cli: &Cli, paths: &Paths) -> Result<()> {
    installer::print_banner();

    let missing = missing_dependencies();
    installer::print_dependency_check(REQUIRED_DEPS, &missing);
    if missing.contains(&"afplay") {
        return Err(SoundsError::MissingDependency(
            "afplay (macOS audio player)".to_string(),
        ));
    }
    if !missing.is_empty() {
        if cli.yes {
            return Err(SoundsError::MissingDependency(missing.join(", ")));
        }
        let Some(install_deps) =
            installer::confirm("Install missing dependencies with Homebrew?", true, false)?
        else {
            return aborted();
        };
        if !install_deps {
            return Err(SoundsError::MissingDependency(missing.join(", ")));
        }
        brew_install(&missing)?;
    }

    if let Some(existing) = detect_existing_install(paths) {
        println!(
            "  {} {} already installed ({} sounds, {} mode)",
            style("!").yellow(),
            existing.theme_displays.join(" + "),
            existing.total_enabled,
            existing.mode
        );
        let Some(proceed) = installer::confirm("Reinstall or change themes?", true, cli.yes)?
        else {
            return aborted();
        };
        if !proceed {
            println!("Keeping the current install.");
            return Ok(());
        }
    }

    let themes = list_themes(paths);
    if themes.is_empty() {
        return Err(SoundsError::Other(format!(
            "no themes found under {}",
            paths.themes_dir.display()
        )));
    }

    let chosen = match resolve_themes(cli, &themes)? {
        Some(chosen) if !chosen.is_empty() => chosen,
        Some(_) => {
            println!("Nothing selected.");
            return Ok(());
        }
        None => return aborted(),
    };

    // Load descriptors and fetch any missing assets up front.
    let mut loaded: Vec<(String, ThemeDescriptor)> = Vec::new();
    for summary in &chosen {
        let theme = load_theme(&summary.name, paths)?;
        let spinner =
            installer::create_spinner(&format!("Fetching sounds for {}...", summary.display));
        let fetched = ensure_theme_assets(&summary.name, &theme, paths);
        spinner.finish_and_clear();
        fetched?;
        loaded.push((summary.name.clone(), theme));
    }

    // Mixing is inherently custom; a single theme defaults to quick.
    let customize = if cli.yes {
        false
    } else if loaded.len() > 1 {
        true
    } else {
        match installer::wants_customization()? {
            Some(choice) => choice,
            None => return aborted(),
        }
    };

    let (selection, outcome) = if customize {
        let Some(preview) =
            installer::confirm("Preview sounds before choosing?", false, false)?
        else {
            return aborted();
        };
        let Some(selection) = installer::customize_selection(&loaded, paths, preview)? else {
            return aborted();
        };
        let theme_names = loaded.iter().map(|(name, _)| name.clone()).collect();
        let outcome = custom_install(&selection, theme_names, paths)?;
        (selection, outcome)
    } else if loaded.len() > 1 {
        // Mixing without customization: every theme's defaults, pooled.
        let selection = merged_default_selection(&loaded);
        let theme_names = loaded.iter().map(|(name, _)| name.clone()).collect();
        let outcome = custom_install(&selection, theme_names, paths)?;
        (selection, outcome)
    } else {
        let (name, theme) = &loaded[0];
        let selection = default_selection(name, theme);
        let outcome = quick_install(name, paths)?;
        (selection, outcome)
    };

    print_install_summary(&selection, &loaded, outcome);
    Ok(())
}

/// Figure out which themes to install: `--theme` wins, then `--mix`
/// prompts a multi-select (with `--yes` it takes every theme, no prompt),
/// then `--yes` takes the first theme, then a single-select prompt.
/// `None` means the user cancelled.
fn resolve_themes(cli: &Cli, themes: &[ThemeSummary]) -> Result<Option<Vec<ThemeSummary>>> {
    if let Some(name) = &cli.theme {
        let Some(summary) = themes.iter().find(|t| t.name == *name) else {
            eprintln!("Available themes:");
            for t in themes {
                eprintln!("  {}", t.name);
            }
            return Err(SoundsError::ThemeNotFound(name.clone()));
        };
        return Ok(Some(vec![summary.clone()]));
    }

    if cli.mix {
        if cli.yes {
            return Ok(Some(themes.to_vec()));
        }
        let Some(indices) = installer::select_themes(themes)? else {
            return Ok(None);
        };
        return Ok(Some(indices.into_iter().map(|i| themes[i].clone()).collect()));
    }

    if cli.yes {
        return Ok(Some(vec![themes[0].clone()]));
    }

    let Some(index) = installer::select_theme(themes)? else {
        return Ok(None);
    };
    Ok(Some(vec![themes[index].clone()]))
}

fn print_install_summary(
    selection: &Selection,
    loaded: &[(String, ThemeDescriptor)],
    outcome: InstallOutcome,
) {
    let mut available: BTreeMap<String, usize> = BTreeMap::new();
    for (_, theme) in loaded {
        for (category, sounds) in &theme.sounds {
            *available.entry(category.clone()).or_insert(0) += sounds.files.len();
        }
    }
    installer::print_summary(selection, &available, outcome);
}

fn aborted() -> Result<()> {
    println!("Aborted.");
    Ok(())
}

fn brew_install(missing: &[&str]) -> Result<()> {
    let status = Command::new("brew").arg("install").args(missing).status()?;
    if !status.success() {
        return Err(SoundsError::Other(format!(
            "brew install exited with {status}"
        )));
    }
    Ok(())
}
