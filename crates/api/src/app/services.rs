use std::sync::Arc;

use anyhow::Context;

use opea_infra::{
    AppConfig, ClienteHandlers, ClienteRepository, FileProjectionStore, InMemoryClienteRepository,
    InMemoryProjectionStore, ProjectionStore, SqliteClienteRepository,
};

/// Handler set over type-erased backends, so one router serves every wiring.
pub type Handlers = ClienteHandlers<Arc<dyn ClienteRepository>, Arc<dyn ProjectionStore>>;

/// Shared application services, cloned into every request.
#[derive(Clone)]
pub struct AppServices {
    handlers: Arc<Handlers>,
}

impl AppServices {
    pub fn new(repository: Arc<dyn ClienteRepository>, store: Arc<dyn ProjectionStore>) -> Self {
        Self {
            handlers: Arc::new(ClienteHandlers::new(repository, store)),
        }
    }

    /// In-memory wiring (dev/test): nothing touches the disk.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryClienteRepository::new()),
            Arc::new(InMemoryProjectionStore::new()),
        )
    }

    pub fn handlers(&self) -> &Handlers {
        &self.handlers
    }
}

/// Persistent wiring: SQLite repository + JSON projection file.
pub async fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    let repository = SqliteClienteRepository::connect(&config.database_url, config.database_max_connections)
        .await
        .with_context(|| format!("failed to open database at {}", config.database_url))?;

    repository
        .ensure_schema()
        .await
        .context("failed to create clientes table")?;

    let store = FileProjectionStore::new(config.projection_path.clone());
    tracing::info!(
        database_url = %config.database_url,
        projection_path = %store.path().display(),
        "services ready"
    );

    Ok(AppServices::new(Arc::new(repository), Arc::new(store)))
}
