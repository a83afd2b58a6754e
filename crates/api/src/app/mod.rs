//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: infrastructure wiring (repository, projection store, handlers)
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request/response DTOs and request validation
//! - `errors.rs`: consistent error responses

use axum::{middleware::from_fn, routing::get, Extension, Router};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(services: AppServices) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api", routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(from_fn(middleware::request_logging))
                .layer(Extension(services)),
        )
}
