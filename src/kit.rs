//! Kit payload source
//!
//! The kit is an on-disk directory of opaque payload files (command
//! templates, docs skeleton, hook scripts, sounds, specialization sets).
//! This module locates and validates that directory and enumerates the
//! payload groups whose members are not fixed by name.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, SetupError};
use crate::options::Specialization;

/// Payload directories every valid kit root carries
const REQUIRED_DIRS: &[&str] = &["commands", "docs", "hooks"];

/// Validated handle to the kit payload directory
#[derive(Debug, Clone)]
pub struct KitSource {
    root: PathBuf,
}

impl KitSource {
    /// Open and validate a kit root
    pub fn open(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(SetupError::KitRootInvalid {
                path: root.display().to_string(),
                reason: "not a directory".to_string(),
            });
        }

        for dir in REQUIRED_DIRS {
            if !root.join(dir).is_dir() {
                return Err(SetupError::KitRootInvalid {
                    path: root.display().to_string(),
                    reason: format!("missing payload directory '{dir}'"),
                });
            }
        }

        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Locate the kit root: explicit override, else `kit/` under the
    /// invocation directory, the invocation directory itself, or `kit/`
    /// next to the binary (and up to two levels above it, covering
    /// `target/debug` layouts).
    pub fn discover(override_root: Option<&Path>, invocation_cwd: &Path) -> Result<Self> {
        if let Some(root) = override_root {
            return Self::open(root);
        }

        let mut candidates = vec![invocation_cwd.join("kit"), invocation_cwd.to_path_buf()];

        if let Ok(exe) = std::env::current_exe() {
            let mut dir = exe.parent().map(Path::to_path_buf);
            for _ in 0..3 {
                if let Some(d) = dir {
                    candidates.push(d.join("kit"));
                    dir = d.parent().map(Path::to_path_buf);
                } else {
                    break;
                }
            }
        }

        candidates
            .iter()
            .find_map(|c| Self::open(c).ok())
            .ok_or(SetupError::KitRootNotFound)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a payload file by kit-relative path
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Command template files directly under `commands/`, sorted by name
    pub fn command_files(&self) -> Result<Vec<PathBuf>> {
        let commands_dir = self.root.join("commands");
        let mut files: Vec<PathBuf> = WalkDir::new(&commands_dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.path().to_path_buf())
            .filter(|p| p.extension().is_some_and(|ext| ext == "md"))
            .collect();
        files.sort();
        Ok(files)
    }

    /// Bundled sound assets directly under `hooks/sounds/`, sorted by name.
    ///
    /// Depth-capped: the plan flattens each asset to its file name, so
    /// nested directories would collide at one destination.
    pub fn sound_files(&self) -> Result<Vec<PathBuf>> {
        let sounds_dir = self.root.join("hooks/sounds");
        if !sounds_dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut files: Vec<PathBuf> = WalkDir::new(&sounds_dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.path().to_path_buf())
            .collect();
        files.sort();
        Ok(files)
    }

    /// Source path for a specializable file: the selected specialization's
    /// variant, or the generic file at `generic_relative` for
    /// [`Specialization::None`].
    pub fn specialized_or_generic(
        &self,
        specialization: Specialization,
        generic_relative: &str,
        file_name: &str,
    ) -> PathBuf {
        match specialization.dir_name() {
            Some(dir) => self.root.join("specializations").join(dir).join(file_name),
            None => self.root.join(generic_relative),
        }
    }
}
