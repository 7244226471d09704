//! Cafe directory entry-point: loads settings, opens the SQLite pool and serves
//! the HTML pages.

mod server;

use std::sync::Arc;

use actix_web::web;
use mockable::{DefaultClock, DefaultEnv};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use cafes::domain::CafeDirectoryService;
use cafes::inbound::http::health::HealthState;
use cafes::inbound::http::state::HttpState;
use cafes::outbound::persistence::{DbPool, DieselCafeRepository, PoolConfig};
use cafes::settings::{BuildMode, ServerSettings, key_fingerprint, secrets_from_env};
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("failed to load .env: {e}");
        }
    }

    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let secrets = secrets_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    let settings =
        ServerSettings::load().map_err(|e| std::io::Error::other(e.to_string()))?;

    info!(
        session_key = %key_fingerprint(&secrets.session_key),
        admin_key = %secrets.admin.fingerprint(),
        "secrets loaded"
    );

    let pool = DbPool::new(
        PoolConfig::new(settings.database_url()).with_max_size(settings.pool_max_size()),
    )
    .await
    .map_err(std::io::Error::other)?;
    let service = Arc::new(CafeDirectoryService::new(Arc::new(
        DieselCafeRepository::new(pool),
    )));
    let http_state = web::Data::new(HttpState::new(
        service.clone(),
        service,
        secrets.admin,
        Arc::new(DefaultClock),
    ));

    let health_state = web::Data::new(HealthState::new());
    let bind_addr = settings.bind_addr();
    let server = create_server(
        health_state,
        http_state,
        ServerConfig::new(secrets.session_key, secrets.cookie_secure, bind_addr),
    )?;
    info!(%bind_addr, database = settings.database_url(), "listening");
    server.await
}
