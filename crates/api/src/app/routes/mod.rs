use axum::Router;

pub mod clientes;
pub mod system;

/// Router for everything under `/api`.
pub fn router() -> Router {
    Router::new().nest("/clientes", clientes::router())
}
