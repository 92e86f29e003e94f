//! Backend entry-point: loads settings, builds the pool and serves the
//! bookstore API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use bookstore::inbound::http::health::HealthState;
use bookstore::outbound::persistence::{DbPool, PoolConfig};
use bookstore::settings::AppSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        AppSettings::load().map_err(|err| eyre!("failed to load configuration: {err}"))?;
    let pool_config = PoolConfig::new(settings.database_url()?)
        .with_max_size(settings.db_pool_max_size());
    let db_pool = DbPool::new(pool_config)
        .await
        .wrap_err("failed to build database pool")?;
    let config = ServerConfig::from_settings(&settings, db_pool)?;

    info!(addr = %config.bind_addr(), "starting bookstore server");
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).wrap_err("failed to start server")?;
    server.await.wrap_err("server terminated with an error")
}
