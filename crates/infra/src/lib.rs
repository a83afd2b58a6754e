//! Infrastructure layer: relational store, projection file, handlers, config.

pub mod config;
pub mod handlers;
pub mod projection;
pub mod repository;

pub use config::{AppConfig, ConfigError};
pub use handlers::{ClienteHandlers, HandlerError};
pub use projection::{
    ClienteDto, ClienteProjectionSync, FileProjectionStore, InMemoryProjectionStore, ProjectionError,
    ProjectionStore,
};
pub use repository::{ClienteRepository, InMemoryClienteRepository, RepositoryError, SqliteClienteRepository};
