//! Error types and handling for the installer
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Two exit paths exist: [`SetupError::Cancelled`] exits with code 0 (a user
//! backing out of a prompt completed the interaction), everything else with
//! code 1.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for installer operations
#[derive(Error, Diagnostic, Debug)]
pub enum SetupError {
    // Environment errors
    #[error("Required tools are missing: {tools}")]
    #[diagnostic(
        code(ccdk::env::missing_tools),
        help("Install the missing tools and re-run the installer")
    )]
    MissingTools { tools: String },

    #[error("Claude Code CLI not found")]
    #[diagnostic(
        code(ccdk::env::claude_cli_not_found),
        help("Install Claude Code first, or re-run and confirm to proceed without it")
    )]
    ClaudeCliNotFound,

    #[error("No interactive terminal available")]
    #[diagnostic(
        code(ccdk::env::no_terminal),
        help("The installer is interactive and must be run from a terminal, not a pipe")
    )]
    NoInteractiveTerminal,

    // Kit source errors
    #[error("Kit payload directory not found")]
    #[diagnostic(
        code(ccdk::kit::not_found),
        help("Run the installer from the kit checkout, or pass --kit-root / set CCDK_KIT_ROOT")
    )]
    KitRootNotFound,

    #[error("Invalid kit payload directory: {path}: {reason}")]
    #[diagnostic(code(ccdk::kit::invalid))]
    KitRootInvalid { path: String, reason: String },

    // Target directory errors
    #[error("Target directory does not exist: {path}")]
    #[diagnostic(
        code(ccdk::target::not_found),
        help("Create the project directory first; the installer does not create it")
    )]
    TargetDirMissing { path: String },

    #[error("Target directory is the installer's own source directory: {path}")]
    #[diagnostic(
        code(ccdk::target::self_install),
        help("Choose a project directory outside the kit checkout")
    )]
    TargetIsKitSource { path: String },

    // File system errors
    #[error("Failed to read file: {path}")]
    #[diagnostic(code(ccdk::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(ccdk::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(ccdk::fs::io_error))]
    IoError { message: String },

    // Settings synthesis errors
    #[error("Failed to serialize settings document: {reason}")]
    #[diagnostic(code(ccdk::settings::serialize_failed))]
    SettingsSerializeFailed { reason: String },

    /// User cancelled an interactive prompt (Esc / Ctrl-C)
    #[error("Installation cancelled")]
    #[diagnostic(code(ccdk::cancelled))]
    Cancelled,
}

impl SetupError {
    pub fn read_failed(path: &std::path::Path, e: &std::io::Error) -> Self {
        SetupError::FileReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
    }

    pub fn write_failed(path: &std::path::Path, e: &std::io::Error) -> Self {
        SetupError::FileWriteFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
    }
}

impl From<std::io::Error> for SetupError {
    fn from(err: std::io::Error) -> Self {
        SetupError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for SetupError {
    fn from(err: serde_json::Error) -> Self {
        SetupError::SettingsSerializeFailed {
            reason: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for SetupError {
    fn from(err: inquire::InquireError) -> Self {
        use inquire::InquireError;
        match err {
            // A required prompt with no attachable terminal must fail
            // immediately, never hang or default to "no".
            InquireError::NotTTY => SetupError::NoInteractiveTerminal,
            InquireError::OperationCanceled | InquireError::OperationInterrupted => {
                SetupError::Cancelled
            }
            other => SetupError::IoError {
                message: other.to_string(),
            },
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, SetupError>;

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_error_contains {
        ($test_name:ident, $err:expr, $($contains:expr),+ $(,)?) => {
            #[test]
            fn $test_name() {
                let err = $err;
                let error_string = err.to_string();
                $(
                    assert!(error_string.contains($contains),
                        "Error message should contain '{}', got: {}",
                        $contains,
                        error_string
                    );
                )+
            }
        };
    }

    test_error_contains!(
        test_missing_tools_error,
        SetupError::MissingTools {
            tools: "jq".to_string()
        },
        "Required tools are missing",
        "jq"
    );

    test_error_contains!(
        test_no_terminal_error,
        SetupError::NoInteractiveTerminal,
        "No interactive terminal"
    );

    test_error_contains!(
        test_kit_root_invalid_error_names_the_reason,
        SetupError::KitRootInvalid {
            path: "/tmp/kit".to_string(),
            reason: "missing payload directory 'docs'".to_string()
        },
        "Invalid kit payload directory",
        "/tmp/kit",
        "missing payload directory 'docs'"
    );

    test_error_contains!(
        test_self_target_error,
        SetupError::TargetIsKitSource {
            path: "/tmp/kit".to_string()
        },
        "own source directory",
        "/tmp/kit"
    );

    #[test]
    fn test_error_code() {
        let err = SetupError::TargetDirMissing {
            path: "/nope".to_string(),
        };
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("ccdk::target::not_found".to_string())
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SetupError = io_err.into();
        assert!(matches!(err, SetupError::IoError { .. }));
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_result: std::result::Result<serde_json::Value, _> =
            serde_json::from_str("not json");
        let err: SetupError = parse_result.unwrap_err().into();
        assert!(matches!(err, SetupError::SettingsSerializeFailed { .. }));
    }

    #[test]
    fn test_not_tty_maps_to_no_terminal() {
        let err: SetupError = inquire::InquireError::NotTTY.into();
        assert!(matches!(err, SetupError::NoInteractiveTerminal));
    }

    #[test]
    fn test_cancel_maps_to_cancelled() {
        let err: SetupError = inquire::InquireError::OperationCanceled.into();
        assert!(matches!(err, SetupError::Cancelled));
        let err: SetupError = inquire::InquireError::OperationInterrupted.into();
        assert!(matches!(err, SetupError::Cancelled));
    }
}
