//! End-to-end tests for SessionService with scripted answers

use std::fs;

use tempfile::TempDir;

use guesstree::application::services::SessionOptions;
use guesstree::application::ApplicationError;
use guesstree::config::{OutlineStyle, Settings, Starter};
use guesstree::domain::GuessTree;
use guesstree::infrastructure::di::ServiceContainer;
use guesstree::infrastructure::traits::ScriptedPrompter;
use guesstree::util::testing;

fn container() -> ServiceContainer {
    testing::init_test_setup();
    ServiceContainer::new(Settings::default())
}

fn learning() -> SessionOptions {
    SessionOptions {
        learn: true,
        ..SessionOptions::default()
    }
}

#[test]
fn given_fresh_session_when_learning_and_saving_then_file_holds_new_question() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("animals.txt");
    let path_str = path.to_string_lossy().to_string();
    let mut io = ScriptedPrompter::new([
        "no",                     // load a tree?
        "no",                     // bigger than a breadbox?
        "no",                     // is it a mouse?
        "a cat",                  // correct answer
        "Does it live outdoors?", // distinguishing question
        "no",                     // answer for a cat
        "no",                     // play again?
        "yes",                    // save?
        path_str.as_str(),        // file name
    ]);

    // Act
    let report = container().session().run(&mut io, &learning()).unwrap();

    // Assert
    assert_eq!(report.rounds, 1);
    assert_eq!(report.learned, 1);
    assert_eq!(report.saved_to, Some(path.clone()));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        fs::read_to_string("tests/resources/trees/learned.txt").unwrap()
    );
    let tail: Vec<&str> = io.transcript()[io.transcript().len() - 7..]
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(
        tail,
        [
            "Thank you! The file has been saved.",
            "Is it bigger than a breadbox?",
            "+-Yes: It is an elephant",
            "`-No:  Does it live outdoors?",
            "  +-Yes: It is a mouse",
            "  `-No:  It is a cat",
            "Bye",
        ]
    );
}

#[test]
fn given_saved_tree_when_next_session_loads_it_then_guesses_learned_object() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("learned.txt");
    fs::copy("tests/resources/trees/learned.txt", &path).unwrap();
    let path_str = path.to_string_lossy().to_string();
    let mut io = ScriptedPrompter::new([
        "yes",             // load a tree?
        path_str.as_str(), // file name
        "no",              // bigger than a breadbox?
        "no",              // lives outdoors?
        "yes",             // is it a cat?
        "no",              // play again?
        "no",              // save?
    ]);

    let report = container().session().run(&mut io, &learning()).unwrap();

    assert_eq!(report.learned, 0);
    assert!(io
        .transcript()
        .iter()
        .any(|l| l == "Is it a cat? (yes/no): yes"));
    assert!(io
        .transcript()
        .iter()
        .any(|l| l == "Hooray! I guessed correctly!"));
}

#[test]
fn given_several_rounds_when_learning_then_every_round_grows_tree() {
    let mut io = ScriptedPrompter::new([
        "no", // load?
        // round 1
        "yes",
        "no",
        "a whale",
        "Does it swim?",
        "yes",
        "y",
        // round 2
        "yes",
        "yes",
        "no",
        "a shark",
        "Is it a mammal?",
        "no",
        "no", // play again?
        "no", // save?
    ]);

    let report = container().session().run(&mut io, &learning()).unwrap();

    assert_eq!(report.rounds, 2);
    assert_eq!(report.learned, 2);
    assert_eq!(report.discarded, 0);
    assert_eq!(
        report.tree.leaves(),
        vec!["a whale", "a shark", "an elephant", "a mouse"]
    );
    assert_eq!(report.saved_to, None);
}

#[test]
fn given_no_learn_when_guess_wrong_then_tree_unchanged() {
    let opts = SessionOptions {
        learn: false,
        starter: Starter::Medium,
        ..SessionOptions::default()
    };
    let mut io = ScriptedPrompter::new(["no", "yes", "no", "no", "no", "no"]);

    let report = container().session().run(&mut io, &opts).unwrap();

    assert_eq!(report.tree, GuessTree::medium());
    assert_eq!(report.learned, 0);
    assert!(io.transcript().iter().any(|l| l == "You stumped me!"));
}

#[test]
fn given_malformed_tree_path_when_starting_then_load_error_and_no_play() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.txt");
    fs::write(&path, "Internal node\n").unwrap();
    let opts = SessionOptions {
        tree_path: Some(path),
        ..learning()
    };
    let mut io = ScriptedPrompter::new(["yes"]);

    let err = container().session().run(&mut io, &opts).unwrap_err();

    assert!(matches!(err, ApplicationError::TreeFile { .. }));
    assert_eq!(io.remaining(), 1);
}

#[test]
fn given_blank_answer_when_learning_then_round_discarded_and_session_continues() {
    let mut io = ScriptedPrompter::new([
        "no",  // load?
        "no",  // bigger?
        "no",  // mouse?
        "",    // correct answer left blank
        "",    // question
        "yes", // answer for new object
        "no",  // play again?
        "no",  // save?
    ]);

    let report = container().session().run(&mut io, &learning()).unwrap();

    assert_eq!(report.tree, GuessTree::small());
    assert_eq!(report.rounds, 1);
    assert_eq!(report.discarded, 1);
    assert_eq!(report.learned, 0);
    assert_eq!(io.transcript().last().map(String::as_str), Some("Bye"));
}

#[test]
fn given_save_path_option_when_finishing_then_saves_without_asking() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("auto.txt");
    let opts = SessionOptions {
        save_path: Some(path.clone()),
        outline: OutlineStyle::Unicode,
        ..learning()
    };
    let mut io = ScriptedPrompter::new(["no", "yes", "yes", "no"]);

    let report = container().session().run(&mut io, &opts).unwrap();

    assert_eq!(report.saved_to, Some(path.clone()));
    assert!(!io
        .transcript()
        .iter()
        .any(|l| l.starts_with("Would you like to save")));
    assert!(io.transcript().iter().any(|l| l.contains("Yes: It is an elephant")));
    assert_eq!(GuessTree::small(), container().store.load(&path).unwrap());
}

#[test]
fn given_failing_save_when_finishing_then_tree_printed_and_error_returned() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("blocker");
    fs::write(&blocker, "x").unwrap();
    let opts = SessionOptions {
        save_path: Some(blocker.join("tree.txt")),
        ..learning()
    };
    let mut io = ScriptedPrompter::new(["no", "yes", "yes", "no"]);

    let err = container().session().run(&mut io, &opts).unwrap_err();

    assert!(matches!(err, ApplicationError::OperationFailed { .. }));
    assert_eq!(io.transcript().last().map(String::as_str), Some("Bye"));
    assert!(io
        .transcript()
        .iter()
        .any(|l| l.starts_with("Could not save the tree")));
}

#[test]
fn given_blank_file_name_with_default_when_saving_then_uses_default() {
    let temp = TempDir::new().unwrap();
    let default_file = temp.path().join("default.txt");
    let opts = SessionOptions {
        default_file: Some(default_file.clone()),
        ..learning()
    };
    let mut io = ScriptedPrompter::new(["no", "yes", "yes", "no", "yes", ""]);

    let report = container().session().run(&mut io, &opts).unwrap();

    assert_eq!(report.saved_to, Some(default_file.clone()));
    assert!(default_file.exists());
}

#[test]
fn given_closed_input_when_playing_then_input_closed() {
    let mut io = ScriptedPrompter::new(["no", "no"]);

    let err = container().session().run(&mut io, &learning()).unwrap_err();

    assert!(matches!(err, ApplicationError::InputClosed));
}
