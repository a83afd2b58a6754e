//! Projection storage handles.
//!
//! A store only moves whole documents: `write` replaces everything, `read`
//! returns everything. The handle is passed to the sync service explicitly so
//! tests can run isolated instances side by side.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::ProjectionError;

#[async_trait]
pub trait ProjectionStore: Send + Sync {
    /// Full document, or `None` if the projection was never written.
    async fn read(&self) -> Result<Option<Vec<u8>>, ProjectionError>;

    /// Replace the full document.
    async fn write(&self, bytes: Vec<u8>) -> Result<(), ProjectionError>;
}

#[async_trait]
impl<S> ProjectionStore for Arc<S>
where
    S: ProjectionStore + ?Sized,
{
    async fn read(&self) -> Result<Option<Vec<u8>>, ProjectionError> {
        (**self).read().await
    }

    async fn write(&self, bytes: Vec<u8>) -> Result<(), ProjectionError> {
        (**self).write(bytes).await
    }
}

/// Projection kept in a single JSON file.
///
/// Writes truncate and rewrite the file in place: no lock, no temp file, no
/// rename. A reader racing a writer may see a stale or partially written file.
#[derive(Debug, Clone)]
pub struct FileProjectionStore {
    path: PathBuf,
}

impl FileProjectionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ProjectionStore for FileProjectionStore {
    async fn read(&self) -> Result<Option<Vec<u8>>, ProjectionError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, bytes: Vec<u8>) -> Result<(), ProjectionError> {
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

/// In-memory projection document for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryProjectionStore {
    inner: RwLock<Option<Vec<u8>>>,
}

impl InMemoryProjectionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectionStore for InMemoryProjectionStore {
    async fn read(&self) -> Result<Option<Vec<u8>>, ProjectionError> {
        match self.inner.read() {
            Ok(doc) => Ok(doc.clone()),
            Err(_) => Err(ProjectionError::Io(std::io::Error::other("projection lock poisoned"))),
        }
    }

    async fn write(&self, bytes: Vec<u8>) -> Result<(), ProjectionError> {
        match self.inner.write() {
            Ok(mut doc) => {
                *doc = Some(bytes);
                Ok(())
            }
            Err(_) => Err(ProjectionError::Io(std::io::Error::other("projection lock poisoned"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileProjectionStore::new(dir.path().join("clientes-projection.json"));

        assert_eq!(store.read().await.unwrap(), None);
    }

    #[tokio::test]
    async fn write_overwrites_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileProjectionStore::new(dir.path().join("clientes-projection.json"));

        store.write(b"[1, 2, 3, 4, 5]".to_vec()).await.unwrap();
        store.write(b"[]".to_vec()).await.unwrap();

        assert_eq!(store.read().await.unwrap(), Some(b"[]".to_vec()));
    }

    #[tokio::test]
    async fn write_into_missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileProjectionStore::new(dir.path().join("nope").join("p.json"));

        assert!(matches!(store.write(b"[]".to_vec()).await, Err(ProjectionError::Io(_))));
    }

    #[tokio::test]
    async fn in_memory_store_starts_empty() {
        let store = InMemoryProjectionStore::new();
        assert_eq!(store.read().await.unwrap(), None);

        store.write(b"[]".to_vec()).await.unwrap();
        assert_eq!(store.read().await.unwrap(), Some(b"[]".to_vec()));
    }
}
