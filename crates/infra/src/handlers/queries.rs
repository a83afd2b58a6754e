use tracing::instrument;

use opea_core::ClienteId;

use crate::projection::{ClienteDto, ProjectionStore};
use crate::repository::ClienteRepository;

use super::{ClienteHandlers, HandlerError};

/// Query: GetAllClientes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetAllClientes;

/// Query: GetClienteById.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetClienteById {
    pub id: ClienteId,
}

impl<R, S> ClienteHandlers<R, S>
where
    R: ClienteRepository + Clone,
    S: ProjectionStore,
{
    #[instrument(skip_all)]
    pub async fn get_all(&self, _query: GetAllClientes) -> Result<Vec<ClienteDto>, HandlerError> {
        Ok(self.projection().get_projection().await?)
    }

    #[instrument(skip_all, fields(cliente_id = %query.id))]
    pub async fn get_by_id(&self, query: GetClienteById) -> Result<Option<ClienteDto>, HandlerError> {
        let clientes = self.projection().get_projection().await?;
        Ok(clientes.into_iter().find(|c| c.id == query.id))
    }
}
