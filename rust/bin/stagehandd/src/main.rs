//! `stagehandd`: the page scaffolding server.
//!
//! Usage:
//!   stagehandd -c <name-or-path> [--listen <addr>]
//!
//! A bare name resolves to `/etc/stagehand/<name>.toml`.
//! If a path with `/` or `.` is given, it's used directly.

mod bootstrap;
mod config;
mod drafts_api;
mod routes;
mod schema_api;

use clap::Parser;
use stagehand_core::Module;
use stagehand_fsgate::FsModule;
use tracing::info;

use config::ServerConfig;
use drafts_api::DraftModule;
use schema_api::SchemaModule;

/// Page scaffolding server.
#[derive(Parser, Debug)]
#[command(name = "stagehandd", about = "Page scaffolding server")]
struct Cli {
    /// Config name or path to config file.
    #[arg(short = 'c', long = "config", required = true)]
    config: String,

    /// Listen address (overrides the config file).
    #[arg(long = "listen")]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let config_path = ServerConfig::resolve_path(&cli.config);
    info!("Loading configuration from {}", config_path.display());
    let server_config = ServerConfig::load(&config_path)?;
    bootstrap::verify_config(&server_config)?;

    let service_config = server_config.to_service_config(cli.listen.as_deref());

    let gateway = bootstrap::open_gateway(
        &service_config.resolve_root_dir(),
        server_config.limits.max_file_bytes,
    )?;
    let kv = bootstrap::open_drafts(&service_config.resolve_db_path())?;

    let modules: Vec<Box<dyn Module>> = vec![
        Box::new(FsModule::new(gateway)),
        Box::new(SchemaModule),
        Box::new(DraftModule::new(kv)),
    ];
    let app = routes::build_router(&modules);

    let listener = tokio::net::TcpListener::bind(&service_config.listen).await?;
    info!("stagehandd listening on {}", service_config.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
