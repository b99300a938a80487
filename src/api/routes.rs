use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;

use crate::api::{error::panic_response, handlers, request_id::request_id_middleware};
use crate::store::traits::LoanStore;

pub fn create_router<S: LoanStore + 'static>() -> Router<Arc<S>> {
    Router::new()
        // Health check
        .route(
            "/health",
            get(handlers::health_check).fallback(handlers::method_not_allowed),
        )
        // Loans
        .route(
            "/api/loans",
            post(handlers::create_loan::<S>).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/loans/:id",
            get(handlers::get_loan::<S>)
                .put(handlers::update_loan::<S>)
                .fallback(handlers::method_not_allowed),
        )
        .fallback(handlers::route_not_found)
}

/// Full application: routes plus the cross-cutting layers.
///
/// The request id layer sits outside the panic catcher so that a panicking
/// handler still produces a response carrying `X-Request-ID`.
pub fn build_app<S: LoanStore + 'static>(store: Arc<S>) -> Router {
    create_router::<S>().with_state(store).layer(
        ServiceBuilder::new()
            .layer(middleware::from_fn(request_id_middleware))
            .layer(CatchPanicLayer::custom(panic_response)),
    )
}
