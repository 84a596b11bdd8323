//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::config::{OutlineStyle, Starter};

/// Self-learning twenty-questions game backed by a persistent decision tree
#[derive(Parser, Debug)]
#[command(name = "guesstree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log verbosity: -v info, -vv debug, -vvv trace
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Config file layered over the global config
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Defaults to `play`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play interactively
    Play(PlayArgs),

    /// Print a tree file as an outline
    Show {
        /// Tree file (default: configured tree_file)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        #[arg(long, value_enum)]
        outline: Option<OutlineStyle>,
    },

    /// Validate a tree file and print its statistics
    Check {
        /// Tree file (default: configured tree_file)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Write a starter tree file
    Init {
        /// Target file (default: configured tree_file)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        #[arg(long, value_enum)]
        starter: Option<Starter>,
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct PlayArgs {
    /// Load this tree instead of asking
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub tree: Option<PathBuf>,

    /// Save to this file at the end without asking
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub save: Option<PathBuf>,

    /// Only guess, never learn new questions
    #[arg(long)]
    pub no_learn: bool,

    /// Starter tree when nothing is loaded
    #[arg(long, value_enum)]
    pub starter: Option<Starter>,

    #[arg(long, value_enum)]
    pub outline: Option<OutlineStyle>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a commented config template
    Template,
    /// Show the global config file location
    Path,
}
