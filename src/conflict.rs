//! Conflict-resolution policy engine
//!
//! A pure decision layer over two sticky flags. Once the user chooses
//! "overwrite all" or "skip all" the corresponding flag is set for the rest
//! of the run and no further prompts are asked; the flags have no mid-run
//! reset. At most one flag is ever true: each is only reachable through a
//! choice that precludes the other.

/// What to do with one candidate file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Write,
    Skip,
}

/// The four answers to a per-file conflict prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictChoice {
    Overwrite,
    Skip,
    OverwriteAll,
    SkipAll,
}

impl ConflictChoice {
    pub const LABELS: [&'static str; 4] = [
        "Overwrite this file",
        "Skip this file",
        "Overwrite all remaining files",
        "Skip all remaining files",
    ];

    pub fn from_index(idx: usize) -> Option<Self> {
        match idx {
            0 => Some(ConflictChoice::Overwrite),
            1 => Some(ConflictChoice::Skip),
            2 => Some(ConflictChoice::OverwriteAll),
            3 => Some(ConflictChoice::SkipAll),
            _ => None,
        }
    }
}

/// Sticky per-run conflict policy, threaded explicitly through the
/// materialization loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConflictPolicy {
    always_overwrite: bool,
    always_skip: bool,
}

impl ConflictPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn always_overwrite(&self) -> bool {
        self.always_overwrite
    }

    pub fn always_skip(&self) -> bool {
        self.always_skip
    }

    /// Decide without user input, when possible.
    ///
    /// Returns `None` exactly when the destination exists and no sticky
    /// flag is set; the caller must then prompt and feed the answer to
    /// [`ConflictPolicy::apply_choice`].
    pub fn sticky_action(&self, dest_exists: bool) -> Option<Action> {
        if self.always_overwrite {
            Some(Action::Write)
        } else if self.always_skip {
            Some(Action::Skip)
        } else if !dest_exists {
            Some(Action::Write)
        } else {
            None
        }
    }

    /// Apply a prompt answer, updating sticky state for the `*All` choices
    pub fn apply_choice(&mut self, choice: ConflictChoice) -> Action {
        match choice {
            ConflictChoice::Overwrite => Action::Write,
            ConflictChoice::Skip => Action::Skip,
            ConflictChoice::OverwriteAll => {
                self.always_overwrite = true;
                Action::Write
            }
            ConflictChoice::SkipAll => {
                self.always_skip = true;
                Action::Skip
            }
        }
    }
}
