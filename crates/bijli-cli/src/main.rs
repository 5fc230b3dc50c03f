use bijli_cli::cli::{Cli, Commands};
use bijli_cli::config;
use clap::Parser;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

mod commands;

fn main() {
    let cli = Cli::parse();

    let loaded = config::load_config(cli.config.as_deref());
    let level = cli
        .log_level
        .or_else(|| loaded.as_ref().ok().and_then(|c| c.log_level()))
        .unwrap_or(Level::INFO);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            std::process::exit(2);
        }
    };

    let result = match &cli.command {
        Commands::Analyze(args) => commands::analyze::handle(args, &config),
        Commands::Presets { format } => commands::presets::handle(*format, &config),
        Commands::Config { command } => {
            commands::config::handle(command, &config, cli.config.as_deref())
        }
        Commands::Completions { shell, out } => {
            commands::completions::handle(*shell, out.as_deref())
        }
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
