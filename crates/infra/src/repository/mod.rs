//! Durable cliente storage.
//!
//! The repository is the sole authority for cliente state. Every write commits
//! before returning; there is no batching and no transaction spanning more
//! than one record. Concurrent writers to the same id race, last write wins.

pub mod in_memory;
pub mod sqlite;

use async_trait::async_trait;
use thiserror::Error;

use opea_clientes::Cliente;
use opea_core::ClienteId;

pub use in_memory::InMemoryClienteRepository;
pub use sqlite::SqliteClienteRepository;

/// Repository operation error.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Could not obtain a connection in time.
    #[error("timed out waiting for a database connection in {0}")]
    Timeout(String),

    #[error("database error: {0}")]
    Database(String),

    /// A stored row could not be turned back into a `Cliente`.
    #[error("corrupt cliente row: {0}")]
    Corrupt(String),
}

#[async_trait]
pub trait ClienteRepository: Send + Sync {
    async fn get_by_id(&self, id: ClienteId) -> Result<Option<Cliente>, RepositoryError>;

    async fn get_all(&self) -> Result<Vec<Cliente>, RepositoryError>;

    async fn add(&self, cliente: &Cliente) -> Result<(), RepositoryError>;

    /// Overwrite the stored record with the same id (no version check).
    async fn update(&self, cliente: &Cliente) -> Result<(), RepositoryError>;

    /// Remove a record. Deleting an unknown id is a no-op, not an error.
    async fn delete(&self, id: ClienteId) -> Result<(), RepositoryError>;
}

#[async_trait]
impl<R> ClienteRepository for std::sync::Arc<R>
where
    R: ClienteRepository + ?Sized,
{
    async fn get_by_id(&self, id: ClienteId) -> Result<Option<Cliente>, RepositoryError> {
        (**self).get_by_id(id).await
    }

    async fn get_all(&self) -> Result<Vec<Cliente>, RepositoryError> {
        (**self).get_all().await
    }

    async fn add(&self, cliente: &Cliente) -> Result<(), RepositoryError> {
        (**self).add(cliente).await
    }

    async fn update(&self, cliente: &Cliente) -> Result<(), RepositoryError> {
        (**self).update(cliente).await
    }

    async fn delete(&self, id: ClienteId) -> Result<(), RepositoryError> {
        (**self).delete(id).await
    }
}
