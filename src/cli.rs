//! CLI definitions using clap derive API
//!
//! The installer is interactive by design: there are no feature flags, only
//! optional overrides for the two directories the run needs to locate before
//! any prompt can be asked.

use clap::builder::{Styles, styling::AnsiColor};
use clap::Parser;
use std::path::PathBuf;

/// ccdk-setup - Claude Code Development Kit installer
#[derive(Parser, Debug)]
#[command(
    name = "ccdk-setup",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Interactive installer for the Claude Code Development Kit",
    long_about = "Installs the Claude Code Development Kit into a project: command templates, \
                  the 3-tier documentation skeleton, hook scripts and their configuration, \
                  and a synthesized .claude/settings.local.json. All installation choices \
                  are collected interactively."
)]
pub struct Cli {
    /// Kit payload directory (defaults to auto-detection near the binary)
    #[arg(long, env = "CCDK_KIT_ROOT")]
    pub kit_root: Option<PathBuf>,

    /// Target project directory (skips the interactive directory prompt)
    #[arg(long, short = 't')]
    pub target: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
