//! Permissions and run summary
//!
//! Marks materialized hook scripts executable and prints the closing
//! summary: what landed where, which integrations still need manual setup
//! outside this repository, and the numbered next steps for the selected
//! options.

use console::Style;

use crate::environment::EnvReport;
use crate::error::Result;
use crate::manifest::Category;
use crate::materializer::{MaterializedFile, Outcome};
use crate::options::InstallOptions;

/// Mark every materialized hook script executable (0o755).
///
/// Only files the plan flagged executable are touched; documentation and
/// config keep their default creation permissions. Returns how many files
/// were marked.
pub fn mark_executables(results: &[MaterializedFile]) -> Result<usize> {
    let mut marked = 0;
    for file in results {
        if !file.action.executable || !file.action.dest.is_file() {
            continue;
        }
        set_executable(&file.action.dest)?;
        marked += 1;
    }
    Ok(marked)
}

#[cfg(unix)]
fn set_executable(path: &std::path::Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .map_err(|e| crate::error::SetupError::write_failed(path, &e))
}

#[cfg(not(unix))]
fn set_executable(_path: &std::path::Path) -> Result<()> {
    Ok(())
}

fn in_place(outcome: Outcome) -> bool {
    matches!(
        outcome,
        Outcome::Written | Outcome::Overwritten | Outcome::Unchanged
    )
}

/// Integrations that require setup outside this repository
pub fn manual_setup_notes(options: &InstallOptions, env: &EnvReport) -> Vec<String> {
    let mut notes = Vec::new();
    if options.enable_context7 {
        notes.push(
            "Context7 MCP server is not bundled: add it to Claude Code with \
             'claude mcp add context7'"
                .to_string(),
        );
    }
    if options.enable_gemini {
        notes.push(
            "Gemini MCP server is not bundled: install and register it before \
             using the gemini-consult command"
                .to_string(),
        );
    }
    if options.enable_notifications && env.audio_command.is_none() {
        notes.push(
            "No audio playback command was found on this system; notification \
             hooks will run silently"
                .to_string(),
        );
    }
    notes
}

/// Ordered next-step instructions for the selected options
pub fn next_steps(options: &InstallOptions) -> Vec<String> {
    let mut steps = vec![
        "Review CLAUDE.md and fill in your project's context".to_string(),
        "Adjust .claude/hooks/config/sensitive-patterns.json for your secrets".to_string(),
    ];
    if options.enable_gemini {
        steps.push("Fill in MCP-ASSISTANT-RULES.md with your coding standards".to_string());
    }
    if options.enable_notifications {
        steps.push("Trigger a task in Claude Code to verify notification sounds".to_string());
    }
    steps.push("Run /full-context in Claude Code to load the documentation".to_string());
    steps
}

/// Print the closing summary
pub fn print_summary(options: &InstallOptions, env: &EnvReport, results: &[MaterializedFile]) {
    let bold = Style::new().bold();
    let heading = Style::new().bold().green();
    let dim = Style::new().dim();

    println!();
    println!("{}", heading.apply_to("Installation complete"));
    println!(
        "  {} {}",
        bold.apply_to("Target:"),
        options.target_dir.display()
    );
    println!("  {} {}", bold.apply_to("Host:"), env.os.label());

    let categories = [
        Category::Command,
        Category::Documentation,
        Category::Hook,
        Category::HookConfig,
        Category::Sound,
        Category::RootContext,
        Category::Settings,
    ];
    for category in categories {
        let planned: Vec<&MaterializedFile> = results
            .iter()
            .filter(|f| f.action.category == category)
            .collect();
        if planned.is_empty() {
            continue;
        }
        let placed = planned.iter().filter(|f| in_place(f.outcome)).count();
        let skipped = planned.len() - placed;
        if skipped > 0 {
            println!(
                "  {} {placed} in place, {}",
                bold.apply_to(format!("{}:", category.label())),
                dim.apply_to(format!("{skipped} skipped"))
            );
        } else {
            println!(
                "  {} {placed} in place",
                bold.apply_to(format!("{}:", category.label()))
            );
        }
    }

    let notes = manual_setup_notes(options, env);
    if !notes.is_empty() {
        println!();
        println!("{}", bold.apply_to("Manual setup required:"));
        for note in &notes {
            println!("  - {note}");
        }
    }

    println!();
    println!("{}", bold.apply_to("Next steps:"));
    for (i, step) in next_steps(options).iter().enumerate() {
        println!("  {}. {step}", i + 1);
    }
}
