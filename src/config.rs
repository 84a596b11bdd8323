//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/guesstree/guesstree.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `GUESSTREE_*` prefix

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::outline::{render_ascii, render_unicode};
use crate::domain::{expand_env_vars, AnswerClassifier, GuessTree};

/// Compiled-in tree used when no file is loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Starter {
    /// One question, two guesses
    #[default]
    Small,
    /// Two questions, three guesses
    Medium,
}

impl Starter {
    pub fn tree(self) -> GuessTree {
        match self {
            Starter::Small => GuessTree::small(),
            Starter::Medium => GuessTree::medium(),
        }
    }
}

/// Outline style for printing trees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutlineStyle {
    /// `+-Yes:` / `` `-No: `` branches
    #[default]
    Ascii,
    /// Box-drawing branches
    Unicode,
}

impl OutlineStyle {
    pub fn render(self, tree: &GuessTree) -> String {
        match self {
            OutlineStyle::Ascii => render_ascii(tree),
            OutlineStyle::Unicode => render_unicode(tree),
        }
    }
}

/// Raw settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub tree_file: Option<PathBuf>,
    pub starter: Option<Starter>,
    pub outline: Option<OutlineStyle>,
    pub affirmatives: Option<Vec<String>>,
}

/// Unified configuration for guesstree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Default tree file for load/save prompts and `show`/`check`
    pub tree_file: PathBuf,
    /// Starter tree when nothing is loaded
    pub starter: Starter,
    /// Outline style for printing
    pub outline: OutlineStyle,
    /// Extra tokens counted as "yes" on top of y/yes/yup/sure
    pub affirmatives: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tree_file: default_tree_file(),
            starter: Starter::default(),
            outline: OutlineStyle::default(),
            affirmatives: Vec::new(),
        }
    }
}

/// Get the default tree file (`$XDG_DATA_HOME/guesstree/tree.txt`).
fn default_tree_file() -> PathBuf {
    ProjectDirs::from("", "", "guesstree")
        .map(|dirs| dirs.data_dir().join("tree.txt"))
        .unwrap_or_else(|| PathBuf::from("guesstree.txt"))
}

/// Get the XDG config directory for guesstree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "guesstree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("guesstree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Merge arrays with union semantics and negation support.
    ///
    /// - Items from overlay are added to base
    /// - Items prefixed with `!` remove the corresponding item from the result
    /// - Duplicates are de-duplicated
    ///
    /// # Examples
    /// ```ignore
    /// merge_array(&["oui"], &["ja"])          // → ["ja", "oui"]
    /// merge_array(&["oui", "ja"], &["!oui"])  // → ["ja"]
    /// ```
    pub fn merge_array(base: &[String], overlay: &[String]) -> Vec<String> {
        let mut result: HashSet<String> = base.iter().cloned().collect();

        for pattern in overlay {
            if let Some(negated) = pattern.strip_prefix('!') {
                result.remove(negated);
            } else {
                result.insert(pattern.clone());
            }
        }

        // Convert to sorted Vec for deterministic output
        let mut vec: Vec<String> = result.into_iter().collect();
        vec.sort();
        vec
    }

    /// Merge overlay config onto self (base).
    ///
    /// - Scalar options: overlay wins if Some, otherwise keep base
    /// - `affirmatives`: union merge with negation support
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            tree_file: overlay
                .tree_file
                .clone()
                .unwrap_or_else(|| self.tree_file.clone()),
            starter: overlay.starter.unwrap_or(self.starter),
            outline: overlay.outline.unwrap_or(self.outline),
            affirmatives: overlay
                .affirmatives
                .as_ref()
                .map(|o| Self::merge_array(&self.affirmatives, o))
                .unwrap_or_else(|| self.affirmatives.clone()),
        }
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.tree_file.to_string_lossy().as_ref());
        self.tree_file = PathBuf::from(expanded);
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; must exist when given
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = config_file {
            if !path.is_file() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            current = current.merge_with(&load_raw_settings(path)?);
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply GUESSTREE_* environment variables as explicit overrides.
    ///
    /// Env vars replace values (not merge) - they are explicit user overrides.
    /// A variable that is set but cannot be parsed is a config error.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("GUESSTREE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("affirmatives"),
        );

        let config = builder.build().map_err(config_err)?;

        if let Some(val) = env_value::<String>(&config, "tree_file")? {
            settings.tree_file = PathBuf::from(val);
        }
        if let Some(val) = env_value::<Starter>(&config, "starter")? {
            settings.starter = val;
        }
        if let Some(val) = env_value::<OutlineStyle>(&config, "outline")? {
            settings.outline = val;
        }
        if let Some(val) = env_value::<Vec<String>>(&config, "affirmatives")? {
            settings.affirmatives = val;
        }

        Ok(settings)
    }

    /// Classifier with the configured extra tokens.
    pub fn classifier(&self) -> AnswerClassifier {
        AnswerClassifier::with_extra(&self.affirmatives)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# guesstree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/guesstree/guesstree.toml
#   File:   --config <FILE>
#   Env:    GUESSTREE_* environment variables (explicit overrides)

# Tree file offered for loading and saving (~ and $VAR are expanded)
# tree_file = "~/.local/share/guesstree/tree.txt"

# Starter tree when no file is loaded: "small" or "medium"
# starter = "small"

# Outline style for printed trees: "ascii" or "unicode"
# outline = "ascii"

# Extra answers counted as "yes" (y, yes, yup, sure always count).
# Merged with the global config; use "!word" to remove an inherited one.
# affirmatives = ["ok", "yep"]
"#
        .to_string()
    }
}

/// None when the key is not set at all.
fn env_value<T: DeserializeOwned>(config: &Config, key: &str) -> Result<Option<T>, ApplicationError> {
    match config.get::<T>(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(ApplicationError::Config {
            message: format!("GUESSTREE_{}: {}", key.to_uppercase(), e),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
