use loan_service::config::{AppConfig, StorageBackend};
use loan_service::store::{MemoryStore, PostgresStore};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    loan_service::logging::init();

    // Load configuration
    let config = AppConfig::load()?;
    log::info!(
        "Configuration loaded: server={}, storage={:?}",
        config.server_address(),
        config.storage.backend
    );

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;

    match config.storage.backend {
        StorageBackend::Postgres => {
            log::info!("Connecting to PostgreSQL...");
            let store = PostgresStore::new(&config.database_url(), config.max_connections()).await?;

            log::info!("Running database migrations...");
            store.migrate().await?;

            log::info!("Loan service running on http://{}", bind_address);
            loan_service::serve(listener, Arc::new(store)).await?;
        }
        StorageBackend::Memory => {
            log::warn!("Using in-memory storage, loans will not survive a restart");
            log::info!("Loan service running on http://{}", bind_address);
            loan_service::serve(listener, Arc::new(MemoryStore::new())).await?;
        }
    }

    Ok(())
}
