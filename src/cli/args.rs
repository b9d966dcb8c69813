//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Resolve e2e test tool flags from env vars and argv, join key-values into argument strings
#[derive(Parser, Debug)]
#[command(name = "argresolve")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, env = "ARGRESOLVE_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Prefix of the snake-cased env variable (overrides config)
    #[arg(long, global = true)]
    pub env_prefix: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a key from env vars, then argv
    Get {
        /// Dash-cased key, e.g. device-name
        key: String,
        /// Arguments to resolve against (after --)
        #[arg(last = true)]
        argv: Vec<String>,
    },

    /// Resolve a boolean flag from argv
    Flag {
        /// Dash-cased key, e.g. headless
        key: String,
        /// Arguments to resolve against (after --)
        #[arg(last = true)]
        argv: Vec<String>,
    },

    /// Join KEY=VALUE pairs into an argument string
    Join {
        /// Prepended to keys not starting with a dash
        #[arg(long, allow_hyphen_values = true)]
        prefix: Option<String>,
        /// Placed between key and value
        #[arg(long, allow_hyphen_values = true)]
        joiner: Option<String>,
        /// KEY=VALUE, or KEY alone for a true flag
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        pairs: Vec<String>,
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

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Print config template
    Template,

    /// Show global config path
    Path,

    /// Write template to the global config path
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
}
