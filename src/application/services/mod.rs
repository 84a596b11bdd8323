//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, Prompter)
//! but are themselves concrete structs, not traits.

mod game;
mod session;
mod store;

pub use game::{ConfirmOnly, GameService, LeafPolicy, Learn, RoundOutcome};
pub use session::{SessionOptions, SessionReport, SessionService};
pub use store::TreeStore;
