//! Game rounds: walking the tree and resolving the reached leaf
//!
//! A round descends from the root, one question per internal node, and hands
//! the reached leaf to a [`LeafPolicy`]. `ConfirmOnly` just checks the guess;
//! `Learn` grows the tree when the guess was wrong.

use tracing::{debug, info, instrument};

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{AnswerClassifier, Branch, GuessTree, Index};
use crate::infrastructure::traits::Prompter;

/// How a round ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    /// The guess was confirmed.
    Guessed { object: String },
    /// The guess was wrong and nothing was learned.
    Missed { guess: String },
    /// The guess was wrong and the leaf became `question`.
    Learned {
        guess: String,
        answer: String,
        question: String,
    },
}

impl RoundOutcome {
    pub fn guessed(&self) -> bool {
        matches!(self, RoundOutcome::Guessed { .. })
    }
}

/// What happens once a traversal reaches a leaf.
pub trait LeafPolicy {
    fn resolve(
        &self,
        game: &GameService,
        tree: &mut GuessTree,
        leaf: Index,
        io: &mut dyn Prompter,
    ) -> ApplicationResult<RoundOutcome>;
}

/// Ask about the guess, never touch the tree.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfirmOnly;

impl ConfirmOnly {
    pub fn guess(
        &self,
        game: &GameService,
        tree: &GuessTree,
        leaf: Index,
        io: &mut dyn Prompter,
    ) -> ApplicationResult<RoundOutcome> {
        let guess = tree.text(leaf)?.to_string();
        if game.confirm(io, &guess_prompt(&guess))? {
            io.tell("Hooray! I guessed correctly!");
            Ok(RoundOutcome::Guessed { object: guess })
        } else {
            io.tell("You stumped me!");
            Ok(RoundOutcome::Missed { guess })
        }
    }
}

impl LeafPolicy for ConfirmOnly {
    fn resolve(
        &self,
        game: &GameService,
        tree: &mut GuessTree,
        leaf: Index,
        io: &mut dyn Prompter,
    ) -> ApplicationResult<RoundOutcome> {
        self.guess(game, tree, leaf, io)
    }
}

/// Ask about the guess; on a miss, learn a question that tells the guess
/// apart from the right answer.
#[derive(Debug, Default, Clone, Copy)]
pub struct Learn;

impl LeafPolicy for Learn {
    #[instrument(level = "debug", skip_all)]
    fn resolve(
        &self,
        game: &GameService,
        tree: &mut GuessTree,
        leaf: Index,
        io: &mut dyn Prompter,
    ) -> ApplicationResult<RoundOutcome> {
        let guess = tree.text(leaf)?.to_string();
        if game.confirm(io, &guess_prompt(&guess))? {
            io.tell("Hooray! I guessed correctly!");
            return Ok(RoundOutcome::Guessed { object: guess });
        }
        io.tell("Oh no! I'll try to do better next time.");

        // everything is asked before the tree is touched
        let answer = game.ask(io, "What was the correct answer? ")?;
        let question = game.ask(
            io,
            &format!("Please enter a question that distinguishes {guess} from {answer}: "),
        )?;
        let answer_is_yes = game.confirm(
            io,
            &format!("For {answer}, what would the answer to your question be? (yes/no): "),
        )?;

        tree.split_leaf(leaf, &answer, &question, answer_is_yes)?;
        info!(%guess, %answer, %question, answer_is_yes, "learned new question");
        Ok(RoundOutcome::Learned {
            guess,
            answer,
            question,
        })
    }
}

fn guess_prompt(guess: &str) -> String {
    format!("Is it {guess}? (yes/no): ")
}

/// Plays rounds against a prompter.
#[derive(Debug, Clone, Default)]
pub struct GameService {
    classifier: AnswerClassifier,
}

impl GameService {
    pub fn new(classifier: AnswerClassifier) -> Self {
        Self { classifier }
    }

    /// Ask for free text, trimmed.
    pub fn ask(&self, io: &mut dyn Prompter, prompt: &str) -> ApplicationResult<String> {
        let answer = io.ask(prompt).or_input_closed()?;
        Ok(answer.trim().to_string())
    }

    /// Ask a yes/no question.
    pub fn confirm(&self, io: &mut dyn Prompter, prompt: &str) -> ApplicationResult<bool> {
        let answer = io.ask(prompt).or_input_closed()?;
        Ok(self.classifier.is_affirmative(&answer))
    }

    /// Walk from the root to a leaf, asking each question on the way.
    ///
    /// A question whose chosen child is missing aborts the walk.
    #[instrument(level = "debug", skip_all)]
    pub fn descend(&self, tree: &GuessTree, io: &mut dyn Prompter) -> ApplicationResult<Index> {
        let mut current = tree.root();
        loop {
            let node = tree.node(current)?;
            if node.is_leaf() {
                return Ok(current);
            }
            let branch = Branch::from_affirmative(
                self.confirm(io, &format!("{} (yes/no): ", node.text))?,
            );
            debug!(question = %node.text, %branch, "descending");
            current = tree.follow(current, branch)?;
        }
    }

    /// One round: descend, then let `policy` resolve the leaf.
    ///
    /// The tree is either left alone or changed by exactly one split.
    #[instrument(level = "debug", skip_all, fields(nodes = tree.len()))]
    pub fn play_round(
        &self,
        tree: &mut GuessTree,
        io: &mut dyn Prompter,
        policy: &dyn LeafPolicy,
    ) -> ApplicationResult<RoundOutcome> {
        let leaf = self.descend(tree, io)?;
        policy.resolve(self, tree, leaf, io)
    }

    /// Read-only round; true when the guess was right.
    pub fn simple_play(&self, tree: &GuessTree, io: &mut dyn Prompter) -> ApplicationResult<bool> {
        let leaf = self.descend(tree, io)?;
        Ok(ConfirmOnly.guess(self, tree, leaf, io)?.guessed())
    }
}
