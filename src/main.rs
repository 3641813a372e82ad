//! Speed infraction registry server.

use std::path::PathBuf;

use clap::Parser;

use speed_registry::config::{load_config, validate_config, ConfigError, RegistryConfig};
use speed_registry::lifecycle::{self, signals, Shutdown};
use speed_registry::observability::init_logging;
use speed_registry::HttpServer;

#[derive(Parser)]
#[command(name = "speed-registry")]
#[command(about = "Record keeping service for speed infractions", long_about = None)]
struct Args {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override server.bind_address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override storage.database_path.
    #[arg(short, long)]
    database: Option<PathBuf>,
}

fn resolve_config(args: Args) -> Result<RegistryConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => RegistryConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.server.bind_address = bind;
    }
    if let Some(database) = args.database {
        config.storage.database_path = database;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = resolve_config(Args::parse())?;
    init_logging(&config.observability)?;

    tracing::info!("speed-registry v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.server.bind_address,
        database_path = %config.storage.database_path.display(),
        busy_timeout_ms = config.storage.busy_timeout_ms,
        "Configuration loaded"
    );

    let (gateway, listener) = lifecycle::prepare(&config).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::forward_to(shutdown);

    let server = HttpServer::new(&config, gateway);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
