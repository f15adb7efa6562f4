//! ccdk-setup - Claude Code Development Kit installer
//!
//! Interactive installer that copies the kit's command templates, 3-tier
//! documentation skeleton, and hook scripts into a project, and synthesizes
//! its `.claude/settings.local.json` hook configuration.

use clap::Parser;

mod cli;
mod conflict;
mod environment;
mod error;
mod finalize;
mod install;
mod kit;
mod manifest;
mod materializer;
mod options;
mod prompt;
mod settings;

use cli::Cli;
use error::SetupError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = install::run(&cli) {
        // Backing out of a prompt is a completed interaction, not a failure
        if matches!(e, SetupError::Cancelled) {
            println!("{}", e);
            std::process::exit(0);
        }
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
