//! Interactive input abstraction
//!
//! All user interaction flows through the [`Prompter`] trait so the option
//! collector and the conflict engine can be exercised in tests without a
//! terminal. The real implementation is backed by `inquire`, whose prompts
//! already normalize input and re-ask on invalid answers; its `NotTTY` error
//! converts to [`SetupError::NoInteractiveTerminal`] (see `error.rs`).

use inquire::{Confirm, Select, Text};

use crate::error::{Result, SetupError};

/// Interactive input source for the installer
pub trait Prompter {
    /// Ask a yes/no question
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool>;

    /// Ask an exclusive choice, returning the selected index
    fn select(&mut self, message: &str, options: &[&str]) -> Result<usize>;

    /// Ask for a line of free text
    fn input(&mut self, message: &str, help: &str) -> Result<String>;
}

/// Fail fast when no interactive device is attachable.
///
/// stdin may legitimately be a pipe (download-and-pipe invocation); prompts
/// then read from the controlling terminal, which is where inquire's
/// backend attaches on unix. Only the absence of any controlling terminal
/// is fatal, checked once before the first prompt so a detached run errors
/// instead of hanging.
#[cfg(unix)]
pub fn ensure_interactive() -> Result<()> {
    if std::fs::File::open("/dev/tty").is_ok() {
        Ok(())
    } else {
        Err(SetupError::NoInteractiveTerminal)
    }
}

#[cfg(not(unix))]
pub fn ensure_interactive() -> Result<()> {
    use std::io::IsTerminal;

    if std::io::stdin().is_terminal() || std::io::stderr().is_terminal() {
        Ok(())
    } else {
        Err(SetupError::NoInteractiveTerminal)
    }
}

/// Terminal prompter backed by `inquire`
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        Ok(Confirm::new(message).with_default(default).prompt()?)
    }

    fn select(&mut self, message: &str, options: &[&str]) -> Result<usize> {
        let choice = Select::new(message, options.to_vec()).raw_prompt()?;
        Ok(choice.index)
    }

    fn input(&mut self, message: &str, help: &str) -> Result<String> {
        Ok(Text::new(message).with_help_message(help).prompt()?)
    }
}

/// Scripted prompter for tests: answers are consumed in order and every
/// prompt message is recorded for assertions.
#[cfg(test)]
pub struct ScriptedPrompter {
    answers: std::collections::VecDeque<Answer>,
    pub transcript: Vec<String>,
}

#[cfg(test)]
#[derive(Debug, Clone)]
pub enum Answer {
    Confirm(bool),
    Select(usize),
    Input(String),
}

#[cfg(test)]
impl ScriptedPrompter {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: answers.into(),
            transcript: Vec::new(),
        }
    }

    fn next(&mut self, message: &str) -> Answer {
        self.transcript.push(message.to_string());
        self.answers
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted answer left for prompt: {message}"))
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, message: &str, _default: bool) -> Result<bool> {
        match self.next(message) {
            Answer::Confirm(v) => Ok(v),
            other => panic!("expected Confirm answer for '{message}', got {other:?}"),
        }
    }

    fn select(&mut self, message: &str, options: &[&str]) -> Result<usize> {
        match self.next(message) {
            Answer::Select(idx) => {
                assert!(
                    idx < options.len(),
                    "scripted index {idx} out of range for '{message}'"
                );
                Ok(idx)
            }
            other => panic!("expected Select answer for '{message}', got {other:?}"),
        }
    }

    fn input(&mut self, message: &str, _help: &str) -> Result<String> {
        match self.next(message) {
            Answer::Input(v) => Ok(v),
            other => panic!("expected Input answer for '{message}', got {other:?}"),
        }
    }
}
