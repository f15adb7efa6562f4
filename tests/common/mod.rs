//! Shared helpers for integration tests

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// The bundled kit payload inside this checkout
pub fn kit_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("kit")
}

/// Installer command with a closed stdin, so any prompt fails the terminal
/// gate instead of hanging the test.
pub fn setup_cmd() -> Command {
    let mut cmd = Command::cargo_bin("ccdk-setup").expect("binary should build");
    cmd.write_stdin("");
    cmd
}

/// Installer command run in a new session with no controlling terminal,
/// for exercising the interactive-terminal gate.
#[cfg(target_os = "linux")]
pub fn detached_cmd() -> Command {
    let mut cmd = Command::new("setsid");
    cmd.arg("-w").arg(assert_cmd::cargo::cargo_bin("ccdk-setup"));
    cmd.write_stdin("");
    cmd
}

/// An empty target project directory
pub struct TestWorkspace {
    pub dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
