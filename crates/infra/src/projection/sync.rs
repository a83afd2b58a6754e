use tracing::debug;

use crate::repository::ClienteRepository;

use super::{ClienteDto, ProjectionError, ProjectionStore};

/// Keeps the projection document in step with the repository.
///
/// `sync_all` is a full-table re-derivation: every call re-reads the whole
/// repository and rewrites the whole document. That is the intended
/// semantics (and a known bottleneck as the table grows); it is not an
/// incremental index.
#[derive(Debug, Clone)]
pub struct ClienteProjectionSync<R, S> {
    repository: R,
    store: S,
}

impl<R, S> ClienteProjectionSync<R, S>
where
    R: ClienteRepository,
    S: ProjectionStore,
{
    pub fn new(repository: R, store: S) -> Self {
        Self { repository, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Rebuild the projection from every row in the repository.
    pub async fn sync_all(&self) -> Result<(), ProjectionError> {
        let clientes = self.repository.get_all().await?;
        let dtos: Vec<ClienteDto> = clientes.iter().map(ClienteDto::from).collect();

        let bytes = serde_json::to_vec_pretty(&dtos).map_err(|e| ProjectionError::Serialize(e.to_string()))?;
        self.store.write(bytes).await?;

        debug!(records = dtos.len(), "cliente projection synced");
        Ok(())
    }

    /// Current projection contents, in stored order.
    ///
    /// A projection that was never written, or holds `null`, reads as empty.
    pub async fn get_projection(&self) -> Result<Vec<ClienteDto>, ProjectionError> {
        let Some(bytes) = self.store.read().await? else {
            return Ok(Vec::new());
        };

        let clientes: Option<Vec<ClienteDto>> =
            serde_json::from_slice(&bytes).map_err(|e| ProjectionError::Deserialize(e.to_string()))?;
        Ok(clientes.unwrap_or_default())
    }
}
