//! Host environment probing
//!
//! Read-only checks against the executable search path: host OS, an
//! available audio-playback command for the notification hook, the external
//! tools the installed hook scripts depend on, and the Claude Code CLI
//! itself.

use std::path::PathBuf;

use crate::error::{Result, SetupError};

/// Tools the installed hook scripts invoke at runtime
pub const REQUIRED_TOOLS: &[&str] = &["jq"];

/// Host operating system, as far as the installer cares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    MacOs,
    Linux,
    Windows,
    Unknown,
}

impl HostOs {
    pub fn detect() -> Self {
        match std::env::consts::OS {
            "macos" => HostOs::MacOs,
            "linux" => HostOs::Linux,
            "windows" => HostOs::Windows,
            _ => HostOs::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HostOs::MacOs => "macOS",
            HostOs::Linux => "Linux",
            HostOs::Windows => "Windows",
            HostOs::Unknown => "unknown",
        }
    }
}

/// Probe results consumed by the rest of the run
#[derive(Debug, Clone)]
pub struct EnvReport {
    pub os: HostOs,
    /// First available audio playback command, if any. Absence only
    /// disables the notification sound convenience.
    pub audio_command: Option<String>,
    pub claude_cli: Option<PathBuf>,
}

impl EnvReport {
    pub fn probe() -> Self {
        let os = HostOs::detect();
        Self {
            os,
            audio_command: find_audio_command(os),
            claude_cli: find_claude_cli(),
        }
    }
}

/// Ordered preference list of audio playback executables per OS
pub fn audio_candidates(os: HostOs) -> &'static [&'static str] {
    match os {
        HostOs::MacOs => &["afplay"],
        HostOs::Linux => &["paplay", "aplay", "play", "ffplay"],
        HostOs::Windows => &["powershell"],
        HostOs::Unknown => &[],
    }
}

/// Select the first audio-playback command present on the search path
pub fn find_audio_command(os: HostOs) -> Option<String> {
    audio_candidates(os)
        .iter()
        .find(|name| which::which(name).is_ok())
        .map(|name| (*name).to_string())
}

/// Verify that every named tool is on the search path
pub fn verify_required_tools(names: &[&str]) -> Result<()> {
    let missing: Vec<&str> = names
        .iter()
        .copied()
        .filter(|name| which::which(name).is_err())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(SetupError::MissingTools {
            tools: missing.join(", "),
        })
    }
}

/// Locate the Claude Code CLI.
///
/// Falls back from the search path to the common install locations used by
/// the native installer and npm global installs.
pub fn find_claude_cli() -> Option<PathBuf> {
    if let Ok(path) = which::which("claude") {
        return Some(path);
    }

    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(".claude/local/claude"));
        candidates.push(home.join(".local/bin/claude"));
        candidates.push(home.join(".npm-global/bin/claude"));
    }
    candidates.push(PathBuf::from("/usr/local/bin/claude"));
    candidates.push(PathBuf::from("/opt/homebrew/bin/claude"));

    candidates.into_iter().find(|p| p.is_file())
}
