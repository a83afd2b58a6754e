use std::sync::RwLock;

use async_trait::async_trait;

use opea_clientes::Cliente;
use opea_core::{ClienteId, Entity};

use super::{ClienteRepository, RepositoryError};

/// In-memory cliente repository for tests/dev.
///
/// Keeps insertion order so `get_all` matches the SQLite implementation.
#[derive(Debug, Default)]
pub struct InMemoryClienteRepository {
    inner: RwLock<Vec<Cliente>>,
}

impl InMemoryClienteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> RepositoryError {
        RepositoryError::Database("in-memory repository lock poisoned".to_string())
    }
}

#[async_trait]
impl ClienteRepository for InMemoryClienteRepository {
    async fn get_by_id(&self, id: ClienteId) -> Result<Option<Cliente>, RepositoryError> {
        let rows = self.inner.read().map_err(|_| Self::poisoned())?;
        Ok(rows.iter().find(|c| *c.id() == id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Cliente>, RepositoryError> {
        let rows = self.inner.read().map_err(|_| Self::poisoned())?;
        Ok(rows.clone())
    }

    async fn add(&self, cliente: &Cliente) -> Result<(), RepositoryError> {
        let mut rows = self.inner.write().map_err(|_| Self::poisoned())?;
        if rows.iter().any(|c| c.same_identity_as(cliente)) {
            return Err(RepositoryError::Database(format!(
                "cliente {} already exists",
                cliente.id()
            )));
        }
        rows.push(cliente.clone());
        Ok(())
    }

    async fn update(&self, cliente: &Cliente) -> Result<(), RepositoryError> {
        let mut rows = self.inner.write().map_err(|_| Self::poisoned())?;
        if let Some(slot) = rows.iter_mut().find(|c| c.same_identity_as(cliente)) {
            *slot = cliente.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: ClienteId) -> Result<(), RepositoryError> {
        let mut rows = self.inner.write().map_err(|_| Self::poisoned())?;
        rows.retain(|c| *c.id() != id);
        Ok(())
    }
}
