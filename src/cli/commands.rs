//! Command dispatch: each handler prints its result and returns an exit code.

use std::io;
use std::path::Path;
use std::sync::Arc;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::services::ArgResolver;
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{ArgsMap, JoinOptions};
use crate::exitcode;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::{ProcessEnvironment, StaticArgParser};
use crate::infrastructure::{InfraError, InfraResult};

pub fn execute_command(cli: &Cli) -> CliResult<i32> {
    let settings = load_settings(cli)?;
    debug!("effective settings: {:?}", settings);

    match &cli.command {
        Commands::Get { key, argv } => cmd_get(settings, key, argv),
        Commands::Flag { key, argv } => cmd_flag(settings, key, argv),
        Commands::Join {
            prefix,
            joiner,
            pairs,
        } => cmd_join(settings, prefix.as_deref(), joiner.as_deref(), pairs),
        Commands::Config { command } => cmd_config(&settings, command),
        Commands::Completion { shell } => cmd_completion(*shell),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(prefix) = &cli.env_prefix {
        settings.env_prefix = prefix.clone();
    }
    Ok(settings)
}

/// Resolver over the live environment and the given argv.
fn container(settings: Settings, argv: &[String]) -> ServiceContainer {
    ServiceContainer::with_deps(
        settings,
        Arc::new(ProcessEnvironment),
        Arc::new(StaticArgParser::from_argv(argv)),
    )
}

#[instrument(skip(settings))]
fn cmd_get(settings: Settings, key: &str, argv: &[String]) -> CliResult<i32> {
    let services = container(settings, argv);
    match services.resolver().get_arg_value(key) {
        Some(value) => {
            output::info(&value);
            Ok(exitcode::OK)
        }
        None => {
            debug!("{}: not set", key);
            Ok(exitcode::UNSET)
        }
    }
}

#[instrument(skip(settings))]
fn cmd_flag(settings: Settings, key: &str, argv: &[String]) -> CliResult<i32> {
    let services = container(settings, argv);
    let flag = services.resolver().get_flag(key);
    output::info(&flag);
    Ok(if flag { exitcode::OK } else { exitcode::FALSE })
}

#[instrument(skip(settings))]
fn cmd_join(
    settings: Settings,
    prefix: Option<&str>,
    joiner: Option<&str>,
    pairs: &[String],
) -> CliResult<i32> {
    let services = container(settings, &[]);
    output::info(&render_join(services.resolver(), prefix, joiner, pairs)?);
    Ok(exitcode::OK)
}

/// Join `pairs`, with the CLI options taking precedence over configured defaults.
fn render_join(
    resolver: &ArgResolver,
    prefix: Option<&str>,
    joiner: Option<&str>,
    pairs: &[String],
) -> CliResult<String> {
    let args = ArgsMap::from_pairs(pairs).map_err(ApplicationError::from)?;
    let defaults = &resolver.settings().join;
    let options = JoinOptions {
        prefix: prefix.map_or_else(|| defaults.prefix.clone(), str::to_string),
        joiner: joiner.map_or_else(|| defaults.joiner.clone(), str::to_string),
    };
    Ok(resolver.join_args(&args, Some(&options)))
}

#[instrument(skip(settings))]
fn cmd_config(settings: &Settings, command: &ConfigCommands) -> CliResult<i32> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => {
                return Err(CliError::Usage(
                    "cannot determine config directory (no home directory)".into(),
                ))
            }
        },
        ConfigCommands::Init { force } => {
            let path = global_config_path().ok_or_else(|| {
                CliError::Usage("cannot determine config directory (no home directory)".into())
            })?;
            write_template(&path, *force)?;
            output::action("Created", &path.display());
        }
    }
    Ok(exitcode::OK)
}

/// Write the config template to `path`, creating parent directories.
///
/// An existing file is only replaced with `force`.
fn write_template(path: &Path, force: bool) -> InfraResult<()> {
    if path.exists() && !force {
        return Err(InfraError::io(
            format!("{} exists, use --force to overwrite", path.display()),
            io::Error::new(io::ErrorKind::AlreadyExists, "config file exists"),
        ));
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| InfraError::io(format!("create {}", parent.display()), e))?;
    }
    std::fs::write(path, Settings::template())
        .map_err(|e| InfraError::io(format!("write {}", path.display()), e))
}

fn cmd_completion(shell: Shell) -> CliResult<i32> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(exitcode::OK)
}
