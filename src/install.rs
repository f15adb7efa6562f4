//! Run orchestration
//!
//! One installer run: locate the kit payload, probe the environment, gate
//! on an interactive terminal, collect options, plan, materialize, write
//! the synthesized settings, and finalize. [`run`] does the real
//! environment work and hands a [`RunContext`] to [`execute`], which takes
//! the prompter as a parameter so the whole flow is testable without a
//! terminal.

use std::path::PathBuf;

use console::Style;

use crate::cli::Cli;
use crate::conflict::ConflictPolicy;
use crate::environment::{EnvReport, REQUIRED_TOOLS, verify_required_tools};
use crate::error::{Result, SetupError};
use crate::finalize::{mark_executables, print_summary};
use crate::kit::KitSource;
use crate::manifest::{Category, plan};
use crate::materializer::{materialize, materialize_content};
use crate::options::{ask_target_dir, collect_options, guard_not_kit_source, resolve_target_dir};
use crate::prompt::{Prompter, TerminalPrompter, ensure_interactive};
use crate::settings::synthesize;

/// Everything [`execute`] needs that touches the real environment
pub struct RunContext {
    pub kit: KitSource,
    pub env: EnvReport,
    pub invocation_cwd: PathBuf,
    /// Pre-validated target from `--target`, when given
    pub target_flag: Option<PathBuf>,
}

fn print_banner(env: &EnvReport) {
    let heading = Style::new().bold().cyan();
    println!(
        "{}",
        heading.apply_to("Claude Code Development Kit installer")
    );
    println!("  Host: {}", env.os.label());
    if let Some(cli) = &env.claude_cli {
        println!("  Claude Code CLI: {}", cli.display());
    }
    match &env.audio_command {
        Some(cmd) => println!("  Audio playback: {cmd}"),
        None => println!("  Audio playback: none found"),
    }
    println!();
}

/// Entry point for a real run
pub fn run(cli: &Cli) -> Result<()> {
    let invocation_cwd = std::env::current_dir()?;
    let kit = KitSource::discover(cli.kit_root.as_deref(), &invocation_cwd)?;
    if cli.verbose {
        println!("Kit payload: {}", kit.root().display());
    }

    // A --target flag is validated before the terminal gate so flag errors
    // surface even from non-interactive invocations
    let target_flag = match &cli.target {
        Some(raw) => {
            let target = resolve_target_dir(&raw.to_string_lossy(), &invocation_cwd)?;
            guard_not_kit_source(&target, kit.root())?;
            Some(target)
        }
        None => None,
    };

    ensure_interactive()?;
    verify_required_tools(REQUIRED_TOOLS)?;

    let ctx = RunContext {
        kit,
        env: EnvReport::probe(),
        invocation_cwd,
        target_flag,
    };
    execute(&ctx, &mut TerminalPrompter)
}

/// The interactive flow, from banner to summary
pub fn execute(ctx: &RunContext, prompter: &mut dyn Prompter) -> Result<()> {
    print_banner(&ctx.env);

    if ctx.env.claude_cli.is_none() {
        let proceed = prompter.confirm(
            "Claude Code CLI was not found on this system. Install the kit anyway?",
            false,
        )?;
        if !proceed {
            return Err(SetupError::ClaudeCliNotFound);
        }
    }

    let target = match &ctx.target_flag {
        Some(target) => target.clone(),
        None => ask_target_dir(prompter, &ctx.invocation_cwd, ctx.kit.root())?,
    };
    let options = collect_options(prompter, target)?;

    let actions = plan(&options, &ctx.kit)?;
    println!();
    println!(
        "Installing {} files into {}",
        actions.len(),
        options.target_dir.display()
    );

    let mut policy = ConflictPolicy::new();
    let mut results = materialize(&actions, &options.target_dir, &mut policy, prompter)?;

    let settings = synthesize(&options, &options.target_dir).to_json_string()?;
    results.push(materialize_content(
        &settings,
        &options.target_dir.join(".claude/settings.local.json"),
        Category::Settings,
        &options.target_dir,
        &mut policy,
        prompter,
    )?);

    mark_executables(&results)?;
    print_summary(&options, &ctx.env, &results);
    Ok(())
}
