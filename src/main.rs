use anyhow::Result;
use clap::Parser;

use geolookup::cli::{Cli, Commands};
use geolookup::config::{DEFAULT_CONFIG_PATH, StaticConfig, update_config};
use geolookup::runtime::modes::{run_config_command, run_server, show_history};
use geolookup::system::init_logging;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut config = StaticConfig::load(config_path);

    match cli.command {
        Some(Commands::History) => {
            update_config(config);
            show_history()
        }
        Some(Commands::Config { action }) => run_config_command(action),
        Some(Commands::Serve { host, port }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config).await
        }
        None => serve(config).await,
    }
}

async fn serve(config: StaticConfig) -> Result<()> {
    // guard 必须存活到进程结束
    let _guard = init_logging(&config.logging)?;
    update_config(config);
    run_server().await
}
