//! Seed the coffee catalogue in the configured database.
//!
//! Usage: `seed-catalogue [--path <file>]`. Requires `DATABASE_URL`; entries
//! already present by name are skipped.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use mockable::DefaultClock;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use coffee_backend::outbound::persistence::{
    DbPool, DieselCoffeeRepository, PoolConfig, run_migrations,
};
use coffee_backend::seed::seed_catalogue;

#[derive(Debug, Parser)]
#[command(name = "seed-catalogue", about = "Insert the seed coffees that are missing")]
struct Args {
    /// JSON seed file; defaults to the embedded list.
    #[arg(long)]
    path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = Args::parse();
    let database_url = env::var("DATABASE_URL").map_err(|_| eyre!("DATABASE_URL must be set"))?;

    run_migrations(&database_url)
        .await
        .wrap_err("failed to migrate the coffee schema")?;
    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .wrap_err("failed to build the database pool")?;

    seed_catalogue(
        args.path.as_deref(),
        Arc::new(DieselCoffeeRepository::new(pool)),
        Arc::new(DefaultClock),
    )
    .await
    .wrap_err("catalogue seeding failed")?;
    Ok(())
}
