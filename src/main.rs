use anyhow::Result;
use clap::Parser;
use remote_jobs::admin_cli::{handle_admin_command, AdminCommand, Cli};
use remote_jobs::{core::ConfigManager, init_logging, start_web_server};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigManager::load_from(&cli.config)?;
    init_logging(&config.logging)?;

    let result = match cli.command {
        None | Some(AdminCommand::Serve) => {
            info!("Starting Remote Jobs API Server");
            start_web_server(config).await
        }
        Some(command) => handle_admin_command(command, &config).await,
    };

    if let Err(e) = &result {
        error!("{:#}", e);
    }
    result
}
