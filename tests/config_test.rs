//! Integration tests for Settings loading across all layers.
//!
//! Merge semantics:
//! - Defaults → Global → File: scalars REPLACE, `affirmatives` UNION with `!` negation
//! - Any → Env vars: REPLACE (explicit user override)
//!
//! Every test runs under `isolated_env`: the process environment is shared by
//! all tests in this binary, so access is serialized, `XDG_CONFIG_HOME` points
//! at a fresh temp dir and GUESSTREE_* variables are cleared.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tempfile::TempDir;

use guesstree::application::ApplicationError;
use guesstree::config::{global_config_path, OutlineStyle, Settings, Starter};

static ENV_LOCK: Mutex<()> = Mutex::new(());

const MANAGED_VARS: [&str; 5] = [
    "XDG_CONFIG_HOME",
    "GUESSTREE_TREE_FILE",
    "GUESSTREE_STARTER",
    "GUESSTREE_OUTLINE",
    "GUESSTREE_AFFIRMATIVES",
];

/// Restores the managed variables on drop, then releases the lock.
struct EnvGuard {
    saved: Vec<(&'static str, Option<OsString>)>,
    xdg: TempDir,
    _lock: MutexGuard<'static, ()>,
}

impl EnvGuard {
    fn config_home(&self) -> &Path {
        self.xdg.path()
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (name, value) in &self.saved {
            match value {
                Some(v) => std::env::set_var(name, v),
                None => std::env::remove_var(name),
            }
        }
    }
}

fn isolated_env() -> EnvGuard {
    let lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let saved = MANAGED_VARS
        .iter()
        .map(|name| (*name, std::env::var_os(name)))
        .collect();
    for name in MANAGED_VARS {
        std::env::remove_var(name);
    }
    let xdg = TempDir::new().unwrap();
    std::env::set_var("XDG_CONFIG_HOME", xdg.path());
    EnvGuard {
        saved,
        xdg,
        _lock: lock,
    }
}

fn write_config(dir: &Path, content: &str) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join("guesstree.toml");
    fs::write(&path, content).unwrap();
    path
}

// ============================================================
// Explicit --config file
// ============================================================

#[test]
fn given_config_file_with_scalars_when_load_then_overrides_defaults() {
    // Arrange
    let _env = isolated_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(
        dir.path(),
        r#"
starter = "medium"
outline = "unicode"
tree_file = "/tmp/guesstree/animals.txt"
"#,
    );

    // Act
    let settings = Settings::load(Some(&path)).expect("load settings");

    // Assert
    assert_eq!(settings.starter, Starter::Medium);
    assert_eq!(settings.outline, OutlineStyle::Unicode);
    assert_eq!(
        settings.tree_file,
        PathBuf::from("/tmp/guesstree/animals.txt")
    );
}

#[test]
fn given_config_file_with_affirmatives_when_load_then_classifier_accepts_them() {
    let _env = isolated_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), r#"affirmatives = ["oui", "ja", "!ja"]"#);

    let settings = Settings::load(Some(&path)).expect("load settings");

    assert!(settings.affirmatives.contains(&"oui".to_string()));
    assert!(!settings.affirmatives.contains(&"ja".to_string()));
    let classifier = settings.classifier();
    assert!(classifier.is_affirmative("Oui"));
    assert!(classifier.is_affirmative("yup"));
    assert!(!classifier.is_affirmative("ja"));
}

#[test]
fn given_partial_config_when_load_then_unset_keys_keep_defaults() {
    let _env = isolated_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), r#"outline = "unicode""#);

    let settings = Settings::load(Some(&path)).expect("load settings");

    assert_eq!(settings.outline, OutlineStyle::Unicode);
    assert_eq!(settings.starter, Starter::Small);
}

#[test]
fn given_tilde_tree_file_when_load_then_expanded() {
    let _env = isolated_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), r#"tree_file = "~/animals.txt""#);

    let settings = Settings::load(Some(&path)).expect("load settings");

    assert!(!settings.tree_file.to_string_lossy().starts_with('~'));
    assert!(settings.tree_file.ends_with("animals.txt"));
}

#[test]
fn given_missing_config_file_when_load_then_config_error() {
    let _env = isolated_env();
    let dir = TempDir::new().unwrap();

    let err = Settings::load(Some(&dir.path().join("absent.toml"))).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn given_invalid_value_when_load_then_config_error() {
    let _env = isolated_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), r#"starter = "huge""#);

    let err = Settings::load(Some(&path)).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
}

#[test]
fn given_template_when_written_and_loaded_then_defaults_survive() {
    let _env = isolated_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), &Settings::template());

    let settings = Settings::load(Some(&path)).expect("load template");

    assert_eq!(settings.starter, Starter::Small);
    assert_eq!(settings.outline, OutlineStyle::Ascii);
}

// ============================================================
// Global XDG config
// ============================================================

#[test]
fn given_global_config_when_load_without_file_then_applied() {
    // Arrange
    let env = isolated_env();
    write_config(
        &env.config_home().join("guesstree"),
        r#"
starter = "medium"
affirmatives = ["oui"]
"#,
    );

    // Act
    let settings = Settings::load(None).expect("load settings");

    // Assert
    assert_eq!(
        global_config_path(),
        Some(env.config_home().join("guesstree/guesstree.toml"))
    );
    assert_eq!(settings.starter, Starter::Medium);
    assert_eq!(settings.affirmatives, vec!["oui"]);
}

#[test]
fn given_global_and_explicit_config_when_load_then_explicit_file_wins() {
    let env = isolated_env();
    write_config(
        &env.config_home().join("guesstree"),
        r#"
starter = "medium"
affirmatives = ["oui"]
"#,
    );
    let dir = TempDir::new().unwrap();
    let path = write_config(
        dir.path(),
        r#"
starter = "small"
outline = "unicode"
affirmatives = ["ja", "!oui"]
"#,
    );

    let settings = Settings::load(Some(&path)).expect("load settings");

    assert_eq!(settings.starter, Starter::Small);
    assert_eq!(settings.outline, OutlineStyle::Unicode);
    assert_eq!(settings.affirmatives, vec!["ja"]);
}

// ============================================================
// GUESSTREE_* environment variables
// ============================================================

#[test]
fn given_env_vars_when_load_then_override_config_files() {
    // Arrange
    let env = isolated_env();
    write_config(
        &env.config_home().join("guesstree"),
        r#"
starter = "small"
affirmatives = ["si"]
"#,
    );
    std::env::set_var("GUESSTREE_STARTER", "medium");
    std::env::set_var("GUESSTREE_OUTLINE", "unicode");
    std::env::set_var("GUESSTREE_AFFIRMATIVES", "oui,ja");
    std::env::set_var("GUESSTREE_TREE_FILE", "/tmp/guesstree/env.txt");

    // Act
    let settings = Settings::load(None).expect("load settings");

    // Assert
    assert_eq!(settings.starter, Starter::Medium);
    assert_eq!(settings.outline, OutlineStyle::Unicode);
    assert_eq!(settings.affirmatives, vec!["oui", "ja"]);
    assert_eq!(settings.tree_file, PathBuf::from("/tmp/guesstree/env.txt"));
    assert!(settings.classifier().is_affirmative("ja"));
    assert!(!settings.classifier().is_affirmative("si"));
}

#[test]
fn given_single_env_token_when_load_then_one_element_list() {
    let _env = isolated_env();
    std::env::set_var("GUESSTREE_AFFIRMATIVES", "oui");

    let settings = Settings::load(None).expect("load settings");

    assert_eq!(settings.affirmatives, vec!["oui"]);
}

#[test]
fn given_invalid_env_value_when_load_then_config_error() {
    let _env = isolated_env();
    std::env::set_var("GUESSTREE_STARTER", "huge");

    let err = Settings::load(None).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
    assert!(err.to_string().contains("GUESSTREE_STARTER"));
}
