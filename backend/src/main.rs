//! Backend entry-point: loads settings, builds the connection pool and serves
//! the users REST endpoints.

mod server;

use std::io;

use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use users_api::outbound::persistence::DbPool;
use users_api::settings::ServiceSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServiceSettings::load_from_iter(std::env::args_os())
        .map_err(|e| io::Error::other(format!("failed to load settings: {e}")))?;
    let pool_config = settings
        .pool_config()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let bind_addr = settings.bind_addr()?;

    // Connections are opened on first checkout so the listener comes up even
    // while the database is unreachable.
    let pool = DbPool::lazy(&pool_config);
    let config = ServerConfig::new(bind_addr, pool);

    info!(
        bind_addr = %config.bind_addr(),
        max_connections = pool_config.max_size(),
        "starting users api"
    );
    create_server(config)?.await
}
