//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::services::SessionOptions;
use crate::cli::args::{Cli, Commands, ConfigCommands, PlayArgs};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, OutlineStyle, Settings, Starter};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::TerminalPrompter;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    // completions and templates need no settings
    match &cli.command {
        Some(Commands::Completion { shell }) => return completion(*shell),
        Some(Commands::Config {
            command: ConfigCommands::Template,
        }) => {
            output::info(&Settings::template());
            return Ok(());
        }
        _ => {}
    }

    let settings = Settings::load(cli.config.as_deref())?;
    debug!("settings: {:?}", settings);
    let container = ServiceContainer::new(settings);

    match &cli.command {
        None => play(&container, &PlayArgs::default()),
        Some(Commands::Play(args)) => play(&container, args),
        Some(Commands::Show { file, outline }) => show(&container, file.as_deref(), *outline),
        Some(Commands::Check { file }) => check(&container, file.as_deref()),
        Some(Commands::Init {
            file,
            starter,
            force,
        }) => init(&container, file.as_deref(), *starter, *force),
        Some(Commands::Config { command }) => config(&container, command),
        Some(Commands::Completion { .. }) => Ok(()),
    }
}

fn tree_file(container: &ServiceContainer, file: Option<&Path>) -> PathBuf {
    file.map(Path::to_path_buf)
        .unwrap_or_else(|| container.settings.tree_file.clone())
}

#[instrument(skip(container))]
fn play(container: &ServiceContainer, args: &PlayArgs) -> CliResult<()> {
    let settings = &container.settings;
    let opts = SessionOptions {
        tree_path: args.tree.clone(),
        save_path: args.save.clone(),
        default_file: Some(settings.tree_file.clone()),
        learn: !args.no_learn,
        starter: args.starter.unwrap_or(settings.starter),
        outline: args.outline.unwrap_or(settings.outline),
    };

    let mut io = TerminalPrompter::stdio();
    let report = container.session().run(&mut io, &opts)?;
    debug!(
        "played {} rounds ({} discarded), learned {} questions, tree has {} nodes",
        report.rounds,
        report.discarded,
        report.learned,
        report.tree.len()
    );
    Ok(())
}

#[instrument(skip(container))]
fn show(container: &ServiceContainer, file: Option<&Path>, outline: Option<OutlineStyle>) -> CliResult<()> {
    let path = tree_file(container, file);
    let tree = container.store.load(&path)?;
    let style = outline.unwrap_or(container.settings.outline);
    print!("{}", style.render(&tree));
    Ok(())
}

#[instrument(skip(container))]
fn check(container: &ServiceContainer, file: Option<&Path>) -> CliResult<()> {
    let path = tree_file(container, file);
    let tree = container.store.load(&path)?;
    output::header(&path.display());
    output::detail(&format!("nodes:     {}", tree.len()));
    output::detail(&format!("questions: {}", tree.questions().len()));
    output::detail(&format!("guesses:   {}", tree.leaves().len()));
    output::detail(&format!("depth:     {}", tree.depth()));
    output::success("valid tree");
    Ok(())
}

#[instrument(skip(container))]
fn init(
    container: &ServiceContainer,
    file: Option<&Path>,
    starter: Option<Starter>,
    force: bool,
) -> CliResult<()> {
    let path = tree_file(container, file);
    let starter = starter.unwrap_or(container.settings.starter);
    container.store.create(&path, &starter.tree(), force)?;
    output::action("Created", &path.display());
    Ok(())
}

fn config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&container.settings.to_toml()?),
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => {
                return Err(CliError::Usage(
                    "no home directory, global config unavailable".to_string(),
                ))
            }
        },
    }
    Ok(())
}

fn completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
