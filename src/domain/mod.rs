//! Domain layer: the guess tree and its text formats
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod answer;
pub mod arena;
pub mod codec;
pub mod error;
pub mod outline;

pub use answer::{is_affirmative, AnswerClassifier, DEFAULT_AFFIRMATIVES};
pub use arena::{Branch, GuessNode, GuessTree, NodeKind, PreOrder};
pub use error::{DomainError, DomainResult};
pub use generational_arena::Index;

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
///
/// Uses shellexpand crate for robust expansion.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
