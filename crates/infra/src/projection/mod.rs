//! Read-side projection of the cliente table.
//!
//! The projection is a derived document mirroring the repository's full
//! contents. It is rebuilt from scratch after every successful write and is
//! the only source for reads; nothing else writes to it.

pub mod store;
pub mod sync;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use opea_clientes::{Cliente, PorteEmpresa};
use opea_core::ClienteId;

use crate::repository::RepositoryError;

pub use store::{FileProjectionStore, InMemoryProjectionStore, ProjectionStore};
pub use sync::ClienteProjectionSync;

/// Plain projection record: the same three fields as the entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClienteDto {
    pub id: ClienteId,
    pub nome_empresa: String,
    pub porte_empresa: PorteEmpresa,
}

impl From<&Cliente> for ClienteDto {
    fn from(cliente: &Cliente) -> Self {
        Self {
            id: cliente.id_typed(),
            nome_empresa: cliente.nome_empresa().to_string(),
            porte_empresa: cliente.porte_empresa(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("projection io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize projection: {0}")]
    Serialize(String),

    #[error("failed to deserialize projection: {0}")]
    Deserialize(String),

    /// Reading the source table for a resync failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
