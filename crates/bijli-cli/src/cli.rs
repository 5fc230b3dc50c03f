use bijli_core::Preset;
use clap::{CommandFactory, Parser, Subcommand, ValueHint};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "bijli", author, version, about = "Find duplicate outage records in grid outage reports", long_about = None)]
pub struct Cli {
    /// Set the logging level (defaults to the configured level, else info)
    #[arg(long, global = true)]
    pub log_level: Option<tracing::Level>,

    /// Use this configuration file instead of ~/.bijli/config/bijli.toml
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Flag feeding grids with duplicate outage records
    Analyze(AnalyzeArgs),
    /// List the built-in and configured analysis profiles
    Presets {
        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: ListFormat,
    },
    /// Configuration file helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
        /// Write to this file, or into this directory under the shell's script name
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(clap::Args, Debug)]
pub struct AnalyzeArgs {
    /// Outage report CSV files; each one is analyzed independently
    #[arg(required = true, value_hint = ValueHint::FilePath)]
    pub inputs: Vec<PathBuf>,

    /// Built-in profile to apply
    #[arg(long, conflicts_with = "profile")]
    pub preset: Option<Preset>,

    /// Named profile from the configuration file
    #[arg(long)]
    pub profile: Option<String>,

    /// How to print results on stdout
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Export destination: a file for one input, a directory for several
    #[arg(short, long, value_hint = ValueHint::AnyPath)]
    pub out: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration as TOML
    Show,
    /// Print the configuration file location
    Path,
}

#[derive(Copy, Clone, Debug, clap::ValueEnum)]
pub enum ListFormat {
    Table,
    Json,
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}
