pub mod api;
pub mod config;
pub mod logging;
pub mod logic;
pub mod model;
pub mod store;

// Export API types
pub use api::handlers;
pub use api::routes;

pub use logic::{LoanOperations, LoanRequestValidator, UpdateResult};
pub use model::*;
pub use store::{LoanStore, MemoryStore, PostgresStore, UpdateOutcome};

use std::sync::Arc;
use tokio::net::TcpListener;

/// Serve the application on an already bound listener until the server stops.
pub async fn serve<S: LoanStore + 'static>(listener: TcpListener, store: Arc<S>) -> anyhow::Result<()> {
    let app = api::routes::build_app(store);
    axum::serve(listener, app).await?;
    Ok(())
}
