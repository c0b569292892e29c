use anyhow::Context;
use clap::Parser;

use catalog_server::db::{create_pool_with_options, Store};
use catalog_server::tracing_setup::{self, TracingConfig};
use catalog_server::{run_server, AppState, ServeArgs};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let args = ServeArgs::parse();
    tracing_setup::init(&TracingConfig { debug: args.debug })?;

    tracing::info!("Starting catalog-server on {}", args.bind);

    let pool = create_pool_with_options(&args.database_url, args.max_connections)
        .await
        .with_context(|| format!("Failed to open database {}", args.database_url))?;

    let state = AppState::new(Store::new(pool), args.authorizer());

    run_server(state, args.server_config())
        .await
        .context("Server error")?;

    Ok(())
}
