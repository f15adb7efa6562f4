//! Installation options and their interactive collection
//!
//! Options are collected once per run and immutable afterwards. The
//! specialization is a single exclusive choice; a mixed selection is
//! unrepresentable.

use std::path::{Path, PathBuf};

use normpath::PathExt;

use crate::error::{Result, SetupError};
use crate::prompt::Prompter;

/// Mutually-exclusive documentation/config variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Specialization {
    None,
    DotnetCore8,
    DotnetFramework472,
    Golang,
}

impl Specialization {
    pub const ALL: [Specialization; 4] = [
        Specialization::None,
        Specialization::DotnetCore8,
        Specialization::DotnetFramework472,
        Specialization::Golang,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Specialization::None => "Generic",
            Specialization::DotnetCore8 => ".NET Core 8",
            Specialization::DotnetFramework472 => ".NET Framework 4.7.2",
            Specialization::Golang => "Go",
        }
    }

    /// Source subdirectory under `kit/specializations/`, if any
    pub fn dir_name(self) -> Option<&'static str> {
        match self {
            Specialization::None => None,
            Specialization::DotnetCore8 => Some("dotnet-core8"),
            Specialization::DotnetFramework472 => Some("dotnet-framework472"),
            Specialization::Golang => Some("golang"),
        }
    }
}

/// One run's installation choices, created once from user input
#[derive(Debug, Clone)]
pub struct InstallOptions {
    pub target_dir: PathBuf,
    pub enable_context7: bool,
    pub enable_gemini: bool,
    pub enable_notifications: bool,
    pub use_direct_command_style: bool,
    pub specialization: Specialization,
}

impl InstallOptions {
    /// The shared MCP security-scan hook applies when any MCP integration
    /// is enabled.
    pub fn any_mcp(&self) -> bool {
        self.enable_context7 || self.enable_gemini
    }
}

/// Resolve user input to an existing target directory.
///
/// A literal `.` resolves to the invocation working directory captured at
/// process start, not the cwd at prompt time. Anything else must name an
/// existing directory; nonexistent paths are fatal with no retry.
pub fn resolve_target_dir(raw: &str, invocation_cwd: &Path) -> Result<PathBuf> {
    let trimmed = raw.trim();
    let candidate = if trimmed == "." {
        invocation_cwd.to_path_buf()
    } else {
        PathBuf::from(trimmed)
    };

    if !candidate.is_dir() {
        return Err(SetupError::TargetDirMissing {
            path: candidate.display().to_string(),
        });
    }

    dunce::canonicalize(&candidate).map_err(|e| SetupError::IoError {
        message: format!("failed to canonicalize {}: {e}", candidate.display()),
    })
}

fn normalized(path: &Path) -> PathBuf {
    path.normalize()
        .map(|np| np.into_path_buf())
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Refuse a target that would overwrite the kit's own payload: the kit root
/// itself or the checkout directory containing it.
pub fn guard_not_kit_source(target: &Path, kit_root: &Path) -> Result<()> {
    let target_norm = normalized(target);
    let kit_norm = normalized(kit_root);

    if target_norm == kit_norm || Some(target_norm.as_path()) == kit_norm.parent() {
        return Err(SetupError::TargetIsKitSource {
            path: target.display().to_string(),
        });
    }

    Ok(())
}

/// Ask for and validate the target directory
pub fn ask_target_dir(
    prompter: &mut dyn Prompter,
    invocation_cwd: &Path,
    kit_root: &Path,
) -> Result<PathBuf> {
    let raw = prompter.input(
        "Target project directory:",
        "Absolute path, or '.' for the directory the installer was launched from",
    )?;
    let target = resolve_target_dir(&raw, invocation_cwd)?;
    guard_not_kit_source(&target, kit_root)?;
    Ok(target)
}

/// Collect the feature toggles and specialization
pub fn collect_options(prompter: &mut dyn Prompter, target_dir: PathBuf) -> Result<InstallOptions> {
    let enable_context7 = prompter.confirm(
        "Enable Context7 MCP integration (up-to-date library docs)?",
        true,
    )?;
    let enable_gemini = prompter.confirm(
        "Enable Gemini MCP integration (architectural consultations)?",
        true,
    )?;
    let enable_notifications = prompter.confirm("Enable notification sounds?", true)?;
    let use_direct_command_style = prompter.confirm(
        "Use direct command style (no sub-agent orchestration)?",
        false,
    )?;

    let labels: Vec<&str> = Specialization::ALL.iter().map(|s| s.label()).collect();
    let idx = prompter.select("Project specialization:", &labels)?;
    let specialization = Specialization::ALL[idx];

    Ok(InstallOptions {
        target_dir,
        enable_context7,
        enable_gemini,
        enable_notifications,
        use_direct_command_style,
        specialization,
    })
}
