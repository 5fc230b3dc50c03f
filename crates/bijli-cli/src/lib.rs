pub mod cli;
pub mod config;

pub use cli::{build_cli_command, AnalyzeArgs, Cli, Commands, ConfigCommands, ListFormat};
pub use config::{BijliConfig, OutputFormat};
