//! guesstree: a twenty-questions game that learns.
//!
//! The knowledge tree lives in [`domain`]; rounds, persistence and the
//! interactive session are [`application`] services wired up by
//! [`infrastructure::di::ServiceContainer`].

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
