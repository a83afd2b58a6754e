use tracing::{info, instrument};

use opea_clientes::{Cliente, PorteEmpresa};
use opea_core::ClienteId;

use crate::projection::ProjectionStore;
use crate::repository::ClienteRepository;

use super::{ClienteHandlers, HandlerError};

/// Command: CreateCliente.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCliente {
    pub nome_empresa: String,
    pub porte_empresa: PorteEmpresa,
}

/// Command: UpdateCliente.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCliente {
    pub id: ClienteId,
    pub nome_empresa: String,
    pub porte_empresa: PorteEmpresa,
}

/// Command: DeleteCliente.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteCliente {
    pub id: ClienteId,
}

impl<R, S> ClienteHandlers<R, S>
where
    R: ClienteRepository + Clone,
    S: ProjectionStore,
{
    #[instrument(skip(self, cmd), fields(porte_empresa = %cmd.porte_empresa))]
    pub async fn create(&self, cmd: CreateCliente) -> Result<Cliente, HandlerError> {
        let cliente = Cliente::new(cmd.nome_empresa, cmd.porte_empresa)?;

        self.repository().add(&cliente).await?;
        self.projection().sync_all().await?;

        info!(cliente_id = %cliente.id_typed(), "cliente created");
        Ok(cliente)
    }

    /// Returns [`HandlerError::NotFound`] when the id is unknown to the repository.
    #[instrument(skip(self, cmd), fields(cliente_id = %cmd.id))]
    pub async fn update(&self, cmd: UpdateCliente) -> Result<Cliente, HandlerError> {
        let Some(mut cliente) = self.repository().get_by_id(cmd.id).await? else {
            return Err(HandlerError::NotFound);
        };

        cliente.update(cmd.nome_empresa, cmd.porte_empresa)?;
        self.repository().update(&cliente).await?;
        self.projection().sync_all().await?;

        info!("cliente updated");
        Ok(cliente)
    }

    /// Deleting an unknown id still resyncs and succeeds.
    #[instrument(skip(self, cmd), fields(cliente_id = %cmd.id))]
    pub async fn delete(&self, cmd: DeleteCliente) -> Result<(), HandlerError> {
        self.repository().delete(cmd.id).await?;
        self.projection().sync_all().await?;

        info!("cliente deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use opea_core::{DomainError, Entity};

    use super::*;
    use crate::projection::InMemoryProjectionStore;
    use crate::repository::InMemoryClienteRepository;

    type TestHandlers = ClienteHandlers<Arc<InMemoryClienteRepository>, Arc<InMemoryProjectionStore>>;

    fn handlers() -> TestHandlers {
        ClienteHandlers::new(
            Arc::new(InMemoryClienteRepository::new()),
            Arc::new(InMemoryProjectionStore::new()),
        )
    }

    fn create_cmd(nome: &str, porte: PorteEmpresa) -> CreateCliente {
        CreateCliente {
            nome_empresa: nome.to_string(),
            porte_empresa: porte,
        }
    }

    #[tokio::test]
    async fn create_persists_and_grows_projection_by_one() {
        let h = handlers();
        h.create(create_cmd("First", PorteEmpresa::Media)).await.unwrap();
        let before = h.projection().get_projection().await.unwrap().len();

        let cliente = h.create(create_cmd("Acme", PorteEmpresa::Pequena)).await.unwrap();

        let projection = h.projection().get_projection().await.unwrap();
        assert_eq!(projection.len(), before + 1);
        let row = projection.iter().find(|d| d.id == *cliente.id()).unwrap();
        assert_eq!(row.nome_empresa, "Acme");
        assert_eq!(row.porte_empresa, PorteEmpresa::Pequena);
        assert!(h.repository().get_by_id(cliente.id_typed()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn create_with_blank_name_is_invalid_and_writes_nothing() {
        let h = handlers();

        let err = h.create(create_cmd("  ", PorteEmpresa::Grande)).await.unwrap_err();

        assert!(matches!(
            err,
            HandlerError::Invalid(DomainError::InvalidArgument { argument: "nome_empresa", .. })
        ));
        assert!(h.repository().get_all().await.unwrap().is_empty());
        assert_eq!(h.projection().store().read().await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_replaces_fields_and_resyncs() {
        let h = handlers();
        let cliente = h.create(create_cmd("Acme", PorteEmpresa::Pequena)).await.unwrap();

        let updated = h
            .update(UpdateCliente {
                id: cliente.id_typed(),
                nome_empresa: "Acme Global".to_string(),
                porte_empresa: PorteEmpresa::Grande,
            })
            .await
            .unwrap();

        assert_eq!(updated.id_typed(), cliente.id_typed());
        let projection = h.projection().get_projection().await.unwrap();
        assert_eq!(projection.len(), 1);
        assert_eq!(projection[0].nome_empresa, "Acme Global");
        assert_eq!(projection[0].porte_empresa, PorteEmpresa::Grande);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let h = handlers();

        let err = h
            .update(UpdateCliente {
                id: ClienteId::new(),
                nome_empresa: "Ghost".to_string(),
                porte_empresa: PorteEmpresa::Media,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, HandlerError::NotFound));
    }

    #[tokio::test]
    async fn update_with_blank_name_leaves_stored_record_alone() {
        let h = handlers();
        let cliente = h.create(create_cmd("Acme", PorteEmpresa::Pequena)).await.unwrap();

        let err = h
            .update(UpdateCliente {
                id: cliente.id_typed(),
                nome_empresa: "".to_string(),
                porte_empresa: PorteEmpresa::Grande,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, HandlerError::Invalid(_)));
        let stored = h.repository().get_by_id(cliente.id_typed()).await.unwrap().unwrap();
        assert_eq!(stored, cliente);
    }

    #[tokio::test]
    async fn delete_removes_from_projection_and_unknown_ids_are_harmless() {
        let h = handlers();
        let keep = h.create(create_cmd("Keep", PorteEmpresa::Pequena)).await.unwrap();
        let gone = h.create(create_cmd("Gone", PorteEmpresa::Media)).await.unwrap();

        h.delete(DeleteCliente { id: gone.id_typed() }).await.unwrap();
        let after_delete = h.projection().get_projection().await.unwrap();
        assert!(after_delete.iter().all(|d| d.id != gone.id_typed()));

        h.delete(DeleteCliente { id: ClienteId::new() }).await.unwrap();
        let after_noop = h.projection().get_projection().await.unwrap();
        assert_eq!(after_noop, after_delete);
        assert_eq!(after_noop.len(), 1);
        assert_eq!(after_noop[0].id, keep.id_typed());
    }
}
