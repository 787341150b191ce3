//! shorewall-tenant - share Shorewall configuration files between applications

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use shorewall_tenant::cli::{Cli, Commands};
use shorewall_tenant::commands::{self, Session};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    // Logs go to stderr so list output stays machine readable.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match &cli.command {
        Commands::Owner { action } => commands::owner::run(*action, &cli.owner_file),
        Commands::Reload => commands::shorewall::reload(&cli.config),
        Commands::Version => commands::shorewall::version(&cli.config),
        Commands::Zones { action } => {
            commands::records::zones(&Session::from_cli(&cli)?, action)
        }
        Commands::Interfaces { action } => {
            commands::records::interfaces(&Session::from_cli(&cli)?, action)
        }
        Commands::Policies { action } => {
            commands::records::policies(&Session::from_cli(&cli)?, action)
        }
        Commands::Rules { action } => {
            commands::records::rules(&Session::from_cli(&cli)?, action)
        }
        Commands::Snat { action } => {
            commands::records::snats(&Session::from_cli(&cli)?, action)
        }
    }
}
