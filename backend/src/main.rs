//! Backend entry-point: loads settings, wires persistence and storage, and
//! serves the coffee API.

use std::env;
use std::ffi::OsString;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use coffee_backend::inbound::http::health::HealthState;
use coffee_backend::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use coffee_backend::outbound::storage::{StorageSettings, image_store_from_settings};
use coffee_backend::seed::{SeedSettings, seed_catalogue_on_startup};
use coffee_backend::server::{
    Listen, ServerConfig, ServerSettings, build_coffee_repository, create_server,
};

fn program_args() -> [OsString; 1] {
    [OsString::from("coffee-backend")]
}

async fn connect_database() -> Result<Option<DbPool>> {
    let Some(database_url) = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()) else {
        return Ok(None);
    };
    run_migrations(&database_url)
        .await
        .wrap_err("failed to migrate the coffee schema")?;
    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .wrap_err("failed to build the database pool")?;
    Ok(Some(pool))
}

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

    let server_settings = ServerSettings::load_from_iter(program_args())
        .map_err(|e| eyre!("failed to load server settings: {e}"))?;
    let storage_settings = StorageSettings::load_from_iter(program_args())
        .map_err(|e| eyre!("failed to load storage settings: {e}"))?;
    let seed_settings = SeedSettings::load_from_iter(program_args())
        .map_err(|e| eyre!("failed to load seed settings: {e}"))?;

    let repository = build_coffee_repository(connect_database().await?);
    seed_catalogue_on_startup(&seed_settings, repository.clone())
        .await
        .wrap_err("catalogue seeding failed")?;
    let images = image_store_from_settings(&storage_settings).await;

    let bind_addr = server_settings
        .bind_addr()
        .wrap_err("SERVER_BIND_ADDR is not a socket address")?;
    let config = ServerConfig::new(Listen::Addr(bind_addr))
        .with_repository(repository)
        .with_image_store(images)
        .with_max_upload_bytes(server_settings.max_upload_bytes());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "coffee backend listening");
    server.await?;
    Ok(())
}
