//! Interactive session: load, play until done, offer to save, print the tree.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::application::services::game::{ConfirmOnly, GameService, LeafPolicy, Learn, RoundOutcome};
use crate::application::services::store::TreeStore;
use crate::application::{ApplicationError, ApplicationResult};
use crate::config::{OutlineStyle, Starter};
use crate::domain::{DomainError, GuessTree};
use crate::infrastructure::traits::Prompter;

/// Knobs for one session, usually taken from CLI flags and settings.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Load this file instead of asking whether to load one
    pub tree_path: Option<PathBuf>,
    /// Save here without asking for a file name
    pub save_path: Option<PathBuf>,
    /// Used when the player leaves a file name blank
    pub default_file: Option<PathBuf>,
    /// Grow the tree on wrong guesses
    pub learn: bool,
    pub starter: Starter,
    pub outline: OutlineStyle,
}

/// What a finished session leaves behind.
#[derive(Debug)]
pub struct SessionReport {
    pub tree: GuessTree,
    /// Rounds played, discarded ones included
    pub rounds: usize,
    pub learned: usize,
    /// Rounds whose answers could not be learned
    pub discarded: usize,
    pub saved_to: Option<PathBuf>,
}

/// Drives the load / play again / save / print loop.
pub struct SessionService {
    game: Arc<GameService>,
    store: Arc<TreeStore>,
}

impl SessionService {
    pub fn new(game: Arc<GameService>, store: Arc<TreeStore>) -> Self {
        Self { game, store }
    }

    /// Run a full session.
    ///
    /// A failed load ends the session. A failed save is reported after the
    /// tree has been printed, so the learned tree is never silently lost.
    #[instrument(level = "debug", skip_all, fields(learn = opts.learn))]
    pub fn run(
        &self,
        io: &mut dyn Prompter,
        opts: &SessionOptions,
    ) -> ApplicationResult<SessionReport> {
        io.tell("Welcome to 20 Questions!");
        let mut tree = self.open_tree(io, opts)?;

        let policy: &dyn LeafPolicy = if opts.learn { &Learn } else { &ConfirmOnly };
        let mut rounds = 0;
        let mut learned = 0;
        let mut discarded = 0;
        loop {
            rounds += 1;
            match self.game.play_round(&mut tree, io, policy) {
                Ok(outcome) => {
                    if matches!(outcome, RoundOutcome::Learned { .. }) {
                        learned += 1;
                    }
                }
                Err(ApplicationError::Domain(e @ DomainError::InvalidText(_))) => {
                    discarded += 1;
                    warn!("round discarded: {e}");
                    io.tell(&format!("Blank answers can't be learned ({e}); the tree is unchanged."));
                }
                Err(e) => return Err(e),
            }
            if !self
                .game
                .confirm(io, "Would you like to play again? (yes/no): ")?
            {
                break;
            }
        }
        info!(rounds, learned, discarded, "session finished");

        let saved = self.offer_save(io, opts, &tree)?;

        for line in opts.outline.render(&tree).lines() {
            io.tell(line);
        }
        io.tell("Bye");

        let saved_to = saved?;
        Ok(SessionReport {
            tree,
            rounds,
            learned,
            discarded,
            saved_to,
        })
    }

    fn open_tree(&self, io: &mut dyn Prompter, opts: &SessionOptions) -> ApplicationResult<GuessTree> {
        if let Some(path) = &opts.tree_path {
            return self.store.load(path);
        }
        if self
            .game
            .confirm(io, "Would you like to load a tree from a file? (yes/no): ")?
        {
            match self.file_name(io, "What's the name of the file? ", opts)? {
                Some(path) => return self.store.load(&path),
                None => io.tell("No file given, starting from the built-in tree."),
            }
        }
        Ok(opts.starter.tree())
    }

    /// Outer error: the conversation broke. Inner error: the save failed.
    fn offer_save(
        &self,
        io: &mut dyn Prompter,
        opts: &SessionOptions,
        tree: &GuessTree,
    ) -> ApplicationResult<ApplicationResult<Option<PathBuf>>> {
        let path = match &opts.save_path {
            Some(path) => path.clone(),
            None => {
                if !self
                    .game
                    .confirm(io, "Would you like to save this tree for later? (yes/no): ")?
                {
                    return Ok(Ok(None));
                }
                match self.file_name(io, "Please enter a file name: ", opts)? {
                    Some(path) => path,
                    None => {
                        io.tell("No file given, the tree was not saved.");
                        return Ok(Ok(None));
                    }
                }
            }
        };

        match self.store.save(&path, tree) {
            Ok(()) => {
                io.tell("Thank you! The file has been saved.");
                Ok(Ok(Some(path)))
            }
            Err(e) => {
                warn!("save failed: {e}");
                io.tell(&format!("Could not save the tree: {e}"));
                Ok(Err(e))
            }
        }
    }

    fn file_name(
        &self,
        io: &mut dyn Prompter,
        prompt: &str,
        opts: &SessionOptions,
    ) -> ApplicationResult<Option<PathBuf>> {
        let prompt = match &opts.default_file {
            Some(default) => format!("{}[{}] ", prompt, default.display()),
            None => prompt.to_string(),
        };
        let name = self.game.ask(io, &prompt)?;
        if name.is_empty() {
            return Ok(opts.default_file.clone());
        }
        Ok(Some(PathBuf::from(name)))
    }
}
