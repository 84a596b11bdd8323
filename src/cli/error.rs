//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Application(e) => match e {
                ApplicationError::TreeFile { .. } => crate::exitcode::DATAERR,
                ApplicationError::Domain(DomainError::InvalidText(_))
                | ApplicationError::Domain(DomainError::EmptyTree)
                | ApplicationError::Domain(DomainError::Malformed { .. }) => {
                    crate::exitcode::DATAERR
                }
                ApplicationError::Domain(_) => crate::exitcode::SOFTWARE,
                ApplicationError::FileNotFound(_) | ApplicationError::InputClosed => {
                    crate::exitcode::NOINPUT
                }
                ApplicationError::FileExists(_) => crate::exitcode::CANTCREAT,
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                ApplicationError::OperationFailed { .. } => crate::exitcode::IOERR,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Branch;
    use std::path::PathBuf;

    #[test]
    fn given_malformed_tree_file_when_mapping_then_dataerr() {
        let err = CliError::from(ApplicationError::TreeFile {
            path: PathBuf::from("t.txt"),
            source: DomainError::EmptyTree,
        });
        assert_eq!(err.exit_code(), crate::exitcode::DATAERR);
    }

    #[test]
    fn given_missing_branch_when_mapping_then_software() {
        let err = CliError::from(ApplicationError::Domain(DomainError::MissingBranch {
            question: "Is it gray?".into(),
            branch: Branch::Yes,
        }));
        assert_eq!(err.exit_code(), crate::exitcode::SOFTWARE);
    }

    #[test]
    fn given_missing_file_when_mapping_then_noinput() {
        let err = CliError::from(ApplicationError::FileNotFound(PathBuf::from("x")));
        assert_eq!(err.exit_code(), crate::exitcode::NOINPUT);
    }
}
