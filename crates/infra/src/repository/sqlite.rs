//! SQLite-backed cliente repository.
//!
//! Single table, no joins:
//!
//! ```text
//! clientes(id TEXT PK, nome_empresa TEXT NOT NULL, porte_empresa INTEGER NOT NULL)
//! ```
//!
//! `porte_empresa` holds the numeric code of [`PorteEmpresa`]. Rows are listed
//! in insertion order (`rowid`).

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;

use opea_clientes::{Cliente, NOME_EMPRESA_MAX_LEN, PorteEmpresa};
use opea_core::{ClienteId, Entity};

use super::{ClienteRepository, RepositoryError};

#[derive(Debug, Clone)]
pub struct SqliteClienteRepository {
    pool: SqlitePool,
}

impl SqliteClienteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool for `database_url`, creating the database file if missing.
    ///
    /// An in-memory database (`sqlite::memory:`) only lives as long as its
    /// connection, so it is pinned to a single connection that never expires.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, RepositoryError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| map_sqlx_error("connect", e))?
            .create_if_missing(true);

        let pool_options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let pool = pool_options
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the `clientes` table when it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        let ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS clientes (
                id            TEXT    NOT NULL PRIMARY KEY,
                nome_empresa  TEXT    NOT NULL CHECK (length(nome_empresa) <= {NOME_EMPRESA_MAX_LEN}),
                porte_empresa INTEGER NOT NULL
            )
            "#
        );

        sqlx::query(&ddl)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;

        Ok(())
    }
}

#[async_trait]
impl ClienteRepository for SqliteClienteRepository {
    async fn get_by_id(&self, id: ClienteId) -> Result<Option<Cliente>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, nome_empresa, porte_empresa
            FROM clientes
            WHERE id = ?1
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_by_id", e))?;

        row.as_ref().map(row_to_cliente).transpose()
    }

    async fn get_all(&self) -> Result<Vec<Cliente>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, nome_empresa, porte_empresa
            FROM clientes
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_all", e))?;

        rows.iter().map(row_to_cliente).collect()
    }

    async fn add(&self, cliente: &Cliente) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO clientes (id, nome_empresa, porte_empresa)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(cliente.id().to_string())
        .bind(cliente.nome_empresa())
        .bind(cliente.porte_empresa().code())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("add", e))?;

        Ok(())
    }

    async fn update(&self, cliente: &Cliente) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            UPDATE clientes
            SET nome_empresa = ?2,
                porte_empresa = ?3
            WHERE id = ?1
            "#,
        )
        .bind(cliente.id().to_string())
        .bind(cliente.nome_empresa())
        .bind(cliente.porte_empresa().code())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update", e))?;

        Ok(())
    }

    async fn delete(&self, id: ClienteId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM clientes WHERE id = ?1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;

        if result.rows_affected() == 0 {
            tracing::debug!(cliente_id = %id, "delete matched no rows");
        }
        Ok(())
    }
}

fn row_to_cliente(row: &SqliteRow) -> Result<Cliente, RepositoryError> {
    let id: String = row
        .try_get("id")
        .map_err(|e| RepositoryError::Corrupt(format!("id: {e}")))?;
    let nome_empresa: String = row
        .try_get("nome_empresa")
        .map_err(|e| RepositoryError::Corrupt(format!("nome_empresa: {e}")))?;
    let porte_code: i64 = row
        .try_get("porte_empresa")
        .map_err(|e| RepositoryError::Corrupt(format!("porte_empresa: {e}")))?;

    let id = ClienteId::from_str(&id).map_err(|e| RepositoryError::Corrupt(e.to_string()))?;
    let porte_empresa = PorteEmpresa::from_code(porte_code)
        .ok_or_else(|| RepositoryError::Corrupt(format!("unknown porte_empresa code {porte_code}")))?;

    Ok(Cliente::restore(id, nome_empresa, porte_empresa))
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::PoolTimedOut => RepositoryError::Timeout(operation.to_string()),
        sqlx::Error::Database(db_err) => {
            RepositoryError::Database(format!("database error in {}: {}", operation, db_err.message()))
        }
        sqlx::Error::PoolClosed => {
            RepositoryError::Database(format!("connection pool closed in {}", operation))
        }
        other => RepositoryError::Database(format!("{} failed: {}", operation, other)),
    }
}
