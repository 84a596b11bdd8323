//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::arena::Branch;

/// Domain errors represent violations of the tree model or its text format.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("tree file is empty")]
    EmptyTree,

    #[error("malformed tree at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("question {question:?} has no {branch} branch")]
    MissingBranch { question: String, branch: Branch },

    #[error("not a leaf: {0:?}")]
    NotALeaf(String),

    #[error("invalid node text: {0:?}")]
    InvalidText(String),

    #[error("node index no longer resolves in the tree")]
    StaleIndex,
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            reason: reason.into(),
        }
    }
}
