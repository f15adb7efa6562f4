//! Plan execution
//!
//! Walks the planned file actions, consults the conflict engine per file,
//! creates destination directory trees, and copies payload bytes. Writes
//! are not transactional: an interrupted run leaves a partially-populated
//! target, and re-running is the intended recovery path because every
//! destination is re-evaluated independently.

use std::fs;
use std::path::Path;

use console::Style;

use crate::conflict::{Action, ConflictChoice, ConflictPolicy};
use crate::error::{Result, SetupError};
use crate::manifest::{Category, FileAction, WriteMode};
use crate::prompt::Prompter;

/// What happened to one planned file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Destination did not exist, file written
    Written,
    /// Destination existed and was replaced
    Overwritten,
    /// Destination already had identical content, copy elided
    Unchanged,
    /// Skipped by the conflict policy
    Skipped,
    /// Never-clobber destination already present, left untouched
    PreservedExisting,
}

/// A planned action together with its outcome
#[derive(Debug, Clone)]
pub struct MaterializedFile {
    pub action: FileAction,
    pub outcome: Outcome,
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| SetupError::write_failed(parent, &e))?;
    }
    Ok(())
}

fn content_hash(path: &Path) -> Result<blake3::Hash> {
    let bytes = fs::read(path).map_err(|e| SetupError::read_failed(path, &e))?;
    Ok(blake3::hash(&bytes))
}

fn display_path<'p>(dest: &'p Path, target_root: &Path) -> std::borrow::Cow<'p, str> {
    dest.strip_prefix(target_root)
        .unwrap_or(dest)
        .to_string_lossy()
}

fn report(outcome: Outcome, rel: &str) {
    match outcome {
        Outcome::Written => println!("  {} {rel}", Style::new().green().apply_to("written")),
        Outcome::Overwritten => {
            println!("  {} {rel}", Style::new().yellow().apply_to("overwritten"));
        }
        Outcome::Unchanged => println!("  {} {rel}", Style::new().dim().apply_to("unchanged")),
        Outcome::Skipped => println!("  {} {rel}", Style::new().dim().apply_to("skipped")),
        Outcome::PreservedExisting => {
            println!("  {} {rel}", Style::new().dim().apply_to("preserved"));
        }
    }
}

/// Resolve the conflict decision for one existing-or-not destination
fn decide(
    policy: &mut ConflictPolicy,
    prompter: &mut dyn Prompter,
    dest_exists: bool,
    rel: &str,
) -> Result<Action> {
    if let Some(action) = policy.sticky_action(dest_exists) {
        return Ok(action);
    }

    // Destination exists and no sticky choice has been made yet
    let idx = prompter.select(
        &format!("File already exists: {rel}"),
        &ConflictChoice::LABELS,
    )?;
    // The prompter can only return an in-range index; anything else is a
    // programming error in a test double
    let choice = ConflictChoice::from_index(idx).ok_or_else(|| SetupError::IoError {
        message: format!("conflict choice index {idx} out of range"),
    })?;
    Ok(policy.apply_choice(choice))
}

fn write_action(action: &FileAction, dest_exists: bool) -> Result<Outcome> {
    if dest_exists && content_hash(&action.source)? == content_hash(&action.dest)? {
        return Ok(Outcome::Unchanged);
    }

    fs::copy(&action.source, &action.dest)
        .map_err(|e| SetupError::write_failed(&action.dest, &e))?;

    Ok(if dest_exists {
        Outcome::Overwritten
    } else {
        Outcome::Written
    })
}

/// Execute one planned action
pub fn materialize_action(
    action: &FileAction,
    target_root: &Path,
    policy: &mut ConflictPolicy,
    prompter: &mut dyn Prompter,
) -> Result<MaterializedFile> {
    ensure_parent_dir(&action.dest)?;
    let rel = display_path(&action.dest, target_root).to_string();
    let dest_exists = action.dest.exists();

    let outcome = match action.write_mode {
        WriteMode::NeverClobber if dest_exists => Outcome::PreservedExisting,
        _ => match decide(policy, prompter, dest_exists, &rel)? {
            Action::Write => write_action(action, dest_exists)?,
            Action::Skip => Outcome::Skipped,
        },
    };

    report(outcome, &rel);
    Ok(MaterializedFile {
        action: action.clone(),
        outcome,
    })
}

/// Execute the whole plan in order
pub fn materialize(
    actions: &[FileAction],
    target_root: &Path,
    policy: &mut ConflictPolicy,
    prompter: &mut dyn Prompter,
) -> Result<Vec<MaterializedFile>> {
    let mut results = Vec::with_capacity(actions.len());
    for action in actions {
        results.push(materialize_action(action, target_root, policy, prompter)?);
    }
    Ok(results)
}

/// Write synthesized content (not a payload copy) through the same
/// conflict machinery as everything else.
pub fn materialize_content(
    content: &str,
    dest: &Path,
    category: Category,
    target_root: &Path,
    policy: &mut ConflictPolicy,
    prompter: &mut dyn Prompter,
) -> Result<MaterializedFile> {
    ensure_parent_dir(dest)?;
    let rel = display_path(dest, target_root).to_string();
    let dest_exists = dest.exists();

    let outcome = match decide(policy, prompter, dest_exists, &rel)? {
        Action::Write => {
            if dest_exists && content_hash(dest)? == blake3::hash(content.as_bytes()) {
                Outcome::Unchanged
            } else {
                fs::write(dest, content).map_err(|e| SetupError::write_failed(dest, &e))?;
                if dest_exists {
                    Outcome::Overwritten
                } else {
                    Outcome::Written
                }
            }
        }
        Action::Skip => Outcome::Skipped,
    };

    report(outcome, &rel);
    Ok(MaterializedFile {
        action: FileAction {
            source: dest.to_path_buf(),
            dest: dest.to_path_buf(),
            category,
            write_mode: WriteMode::Respect,
            executable: false,
        },
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{Answer, ScriptedPrompter};
    use tempfile::TempDir;

    fn action(source: &Path, dest: &Path) -> FileAction {
        FileAction {
            source: source.to_path_buf(),
            dest: dest.to_path_buf(),
            category: Category::Command,
            write_mode: WriteMode::Respect,
            executable: false,
        }
    }

    fn clobber_action(source: &Path, dest: &Path) -> FileAction {
        FileAction {
            write_mode: WriteMode::NeverClobber,
            ..action(source, dest)
        }
    }

    #[test]
    fn test_new_file_written_without_prompting() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src.md");
        let dst = temp.path().join("out/nested/dst.md");
        fs::write(&src, "payload").unwrap();

        let mut policy = ConflictPolicy::new();
        let mut prompter = ScriptedPrompter::new(vec![]);
        let result =
            materialize_action(&action(&src, &dst), temp.path(), &mut policy, &mut prompter)
                .unwrap();

        assert_eq!(result.outcome, Outcome::Written);
        assert_eq!(fs::read_to_string(&dst).unwrap(), "payload");
        assert!(prompter.transcript.is_empty());
    }

    #[test]
    fn test_existing_file_prompts_and_overwrites() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src.md");
        let dst = temp.path().join("dst.md");
        fs::write(&src, "new").unwrap();
        fs::write(&dst, "old").unwrap();

        let mut policy = ConflictPolicy::new();
        let mut prompter = ScriptedPrompter::new(vec![Answer::Select(0)]);
        let result =
            materialize_action(&action(&src, &dst), temp.path(), &mut policy, &mut prompter)
                .unwrap();

        assert_eq!(result.outcome, Outcome::Overwritten);
        assert_eq!(fs::read_to_string(&dst).unwrap(), "new");
        assert!(prompter.transcript[0].contains("dst.md"));
    }

    #[test]
    fn test_existing_file_skip_preserves_content() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src.md");
        let dst = temp.path().join("dst.md");
        fs::write(&src, "new").unwrap();
        fs::write(&dst, "old").unwrap();

        let mut policy = ConflictPolicy::new();
        let mut prompter = ScriptedPrompter::new(vec![Answer::Select(1)]);
        let result =
            materialize_action(&action(&src, &dst), temp.path(), &mut policy, &mut prompter)
                .unwrap();

        assert_eq!(result.outcome, Outcome::Skipped);
        assert_eq!(fs::read_to_string(&dst).unwrap(), "old");
    }

    #[test]
    fn test_overwrite_all_answers_once_for_many_conflicts() {
        let temp = TempDir::new().unwrap();
        let mut actions = Vec::new();
        for i in 0..3 {
            let src = temp.path().join(format!("src{i}.md"));
            let dst = temp.path().join(format!("dst{i}.md"));
            fs::write(&src, format!("new{i}")).unwrap();
            fs::write(&dst, format!("old{i}")).unwrap();
            actions.push(action(&src, &dst));
        }

        let mut policy = ConflictPolicy::new();
        let mut prompter = ScriptedPrompter::new(vec![Answer::Select(2)]);
        let results = materialize(&actions, temp.path(), &mut policy, &mut prompter).unwrap();

        assert_eq!(prompter.transcript.len(), 1);
        assert!(results.iter().all(|r| r.outcome == Outcome::Overwritten));
        assert!(policy.always_overwrite());
        assert!(!policy.always_skip());
    }

    #[test]
    fn test_skip_all_answers_once_for_many_conflicts() {
        let temp = TempDir::new().unwrap();
        let mut actions = Vec::new();
        for i in 0..3 {
            let src = temp.path().join(format!("src{i}.md"));
            let dst = temp.path().join(format!("dst{i}.md"));
            fs::write(&src, format!("new{i}")).unwrap();
            fs::write(&dst, format!("old{i}")).unwrap();
            actions.push(action(&src, &dst));
        }

        let mut policy = ConflictPolicy::new();
        let mut prompter = ScriptedPrompter::new(vec![Answer::Select(3)]);
        let results = materialize(&actions, temp.path(), &mut policy, &mut prompter).unwrap();

        assert_eq!(prompter.transcript.len(), 1);
        assert!(results.iter().all(|r| r.outcome == Outcome::Skipped));
        for i in 0..3 {
            let dst = temp.path().join(format!("dst{i}.md"));
            assert_eq!(fs::read_to_string(&dst).unwrap(), format!("old{i}"));
        }
    }

    #[test]
    fn test_identical_content_reports_unchanged() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src.md");
        let dst = temp.path().join("dst.md");
        fs::write(&src, "same").unwrap();
        fs::write(&dst, "same").unwrap();

        let mut policy = ConflictPolicy::new();
        let mut prompter = ScriptedPrompter::new(vec![Answer::Select(0)]);
        let result =
            materialize_action(&action(&src, &dst), temp.path(), &mut policy, &mut prompter)
                .unwrap();

        assert_eq!(result.outcome, Outcome::Unchanged);
    }

    #[test]
    fn test_never_clobber_preserves_without_prompting() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src.md");
        let dst = temp.path().join("CLAUDE.md");
        fs::write(&src, "kit version").unwrap();
        fs::write(&dst, "user version").unwrap();

        let mut policy = ConflictPolicy::new();
        let mut prompter = ScriptedPrompter::new(vec![]);
        let result = materialize_action(
            &clobber_action(&src, &dst),
            temp.path(),
            &mut policy,
            &mut prompter,
        )
        .unwrap();

        assert_eq!(result.outcome, Outcome::PreservedExisting);
        assert_eq!(fs::read_to_string(&dst).unwrap(), "user version");
        assert!(prompter.transcript.is_empty());
    }

    #[test]
    fn test_never_clobber_even_under_overwrite_all() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src.md");
        let dst = temp.path().join("CLAUDE.md");
        fs::write(&src, "kit version").unwrap();
        fs::write(&dst, "user version").unwrap();

        let mut policy = ConflictPolicy::new();
        policy.apply_choice(ConflictChoice::OverwriteAll);
        let mut prompter = ScriptedPrompter::new(vec![]);
        let result = materialize_action(
            &clobber_action(&src, &dst),
            temp.path(),
            &mut policy,
            &mut prompter,
        )
        .unwrap();

        assert_eq!(result.outcome, Outcome::PreservedExisting);
        assert_eq!(fs::read_to_string(&dst).unwrap(), "user version");
    }

    #[test]
    fn test_never_clobber_writes_when_absent() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src.md");
        let dst = temp.path().join("CLAUDE.md");
        fs::write(&src, "kit version").unwrap();

        let mut policy = ConflictPolicy::new();
        let mut prompter = ScriptedPrompter::new(vec![]);
        let result = materialize_action(
            &clobber_action(&src, &dst),
            temp.path(),
            &mut policy,
            &mut prompter,
        )
        .unwrap();

        assert_eq!(result.outcome, Outcome::Written);
        assert_eq!(fs::read_to_string(&dst).unwrap(), "kit version");
    }

    #[test]
    fn test_rerun_with_overwrite_all_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src.md");
        let dst = temp.path().join("dst.md");
        fs::write(&src, "payload").unwrap();
        let actions = [action(&src, &dst)];

        let mut policy = ConflictPolicy::new();
        policy.apply_choice(ConflictChoice::OverwriteAll);
        let mut prompter = ScriptedPrompter::new(vec![]);
        materialize(&actions, temp.path(), &mut policy, &mut prompter).unwrap();
        let first = fs::read(&dst).unwrap();

        let mut policy = ConflictPolicy::new();
        policy.apply_choice(ConflictChoice::OverwriteAll);
        let results = materialize(&actions, temp.path(), &mut policy, &mut prompter).unwrap();
        let second = fs::read(&dst).unwrap();

        assert_eq!(first, second);
        assert_eq!(results[0].outcome, Outcome::Unchanged);
    }

    #[test]
    fn test_materialize_content_writes_and_reruns_unchanged() {
        let temp = TempDir::new().unwrap();
        let dst = temp.path().join(".claude/settings.local.json");

        let mut policy = ConflictPolicy::new();
        let mut prompter = ScriptedPrompter::new(vec![]);
        let result = materialize_content(
            "{\"hooks\":{}}",
            &dst,
            Category::Settings,
            temp.path(),
            &mut policy,
            &mut prompter,
        )
        .unwrap();
        assert_eq!(result.outcome, Outcome::Written);

        let mut prompter = ScriptedPrompter::new(vec![Answer::Select(0)]);
        let result = materialize_content(
            "{\"hooks\":{}}",
            &dst,
            Category::Settings,
            temp.path(),
            &mut policy,
            &mut prompter,
        )
        .unwrap();
        assert_eq!(result.outcome, Outcome::Unchanged);
    }
}
