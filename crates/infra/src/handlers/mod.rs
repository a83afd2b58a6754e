//! Command/query handlers (application-level orchestration).
//!
//! One method per operation on [`ClienteHandlers`]; each is a single linear
//! sequence with no intermediate states:
//!
//! ```text
//! create:    Cliente::new -> repository.add    -> projection.sync_all
//! update:    repository.get_by_id -> Cliente::update -> repository.update -> projection.sync_all
//! delete:    repository.delete (no-op if absent) -> projection.sync_all
//! get_all:   projection.get_projection
//! get_by_id: projection.get_projection -> linear scan
//! ```
//!
//! Reads are served from the projection only, never from the repository.
//! Outcomes are explicit `Result`s; the HTTP layer maps them to status codes.

pub mod commands;
pub mod queries;

use thiserror::Error;

use opea_core::DomainError;

use crate::projection::{ClienteProjectionSync, ProjectionError, ProjectionStore};
use crate::repository::{ClienteRepository, RepositoryError};

pub use commands::{CreateCliente, DeleteCliente, UpdateCliente};
pub use queries::{GetAllClientes, GetClienteById};

#[derive(Debug, Error)]
pub enum HandlerError {
    /// Input rejected by a domain guard.
    #[error(transparent)]
    Invalid(DomainError),

    #[error("cliente not found")]
    NotFound,

    #[error(transparent)]
    Repository(RepositoryError),

    #[error(transparent)]
    Projection(ProjectionError),
}

impl HandlerError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, HandlerError::Repository(RepositoryError::Timeout(_)))
    }
}

impl From<DomainError> for HandlerError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::NotFound => HandlerError::NotFound,
            other => HandlerError::Invalid(other),
        }
    }
}

impl From<RepositoryError> for HandlerError {
    fn from(value: RepositoryError) -> Self {
        HandlerError::Repository(value)
    }
}

impl From<ProjectionError> for HandlerError {
    fn from(value: ProjectionError) -> Self {
        match value {
            ProjectionError::Repository(e) => HandlerError::Repository(e),
            other => HandlerError::Projection(other),
        }
    }
}

/// The full handler set for clientes.
///
/// Holds the repository (write side) and the projection sync service (read
/// side). There is no locking between the steps of a handler; concurrent
/// writers interleave freely.
#[derive(Debug, Clone)]
pub struct ClienteHandlers<R, S> {
    repository: R,
    projection: ClienteProjectionSync<R, S>,
}

impl<R, S> ClienteHandlers<R, S>
where
    R: ClienteRepository + Clone,
    S: ProjectionStore,
{
    pub fn new(repository: R, store: S) -> Self {
        let projection = ClienteProjectionSync::new(repository.clone(), store);
        Self {
            repository,
            projection,
        }
    }

    pub fn projection(&self) -> &ClienteProjectionSync<R, S> {
        &self.projection
    }

    pub(crate) fn repository(&self) -> &R {
        &self.repository
    }
}
