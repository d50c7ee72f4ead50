use anyhow::Result;
use clap::Parser;
use log::{debug, info};

use officeui::config::Settings;

mod cli;

use cli::commands::{boot_command, call_command, settings_command};
use cli::{Cli, Commands};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let stored = Settings::load()?;

    // Initialize logger to file (truncate on each run)
    let log_file = stored.open_log_file()?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    info!("Starting officeui");
    info!("Settings loaded from {:?}", Settings::get_config_path()?);
    debug!("Stored settings: {:?}", stored);

    let mut settings = stored.clone().with_env_overrides();
    if let Some(root) = cli.root {
        settings.resource_root = root;
    }
    if let Some(bootstrap) = cli.bootstrap {
        settings.bootstrap_url = bootstrap;
    }

    match cli.command {
        Commands::Boot => boot_command(&settings).await,
        Commands::Call(args) => call_command(&settings, args).await,
        // Only the stored values are written back, never the overrides.
        Commands::Settings(command) => settings_command(command, stored),
    }
}
