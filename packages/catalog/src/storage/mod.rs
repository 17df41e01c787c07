use crate::types::{Producto, ProductoCreateInput};
use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

pub mod sqlite;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Database error: {0}")]
    Database(String),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("{0}")]
    Constraint(String),
    #[error("Producto no encontrado.")]
    NotFound,
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage configuration, supplied at construction. Never read from ambient
/// global state.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub path: PathBuf,
    pub max_connections: u32,
    pub busy_timeout_seconds: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("bodega.db"),
            max_connections: 10,
            busy_timeout_seconds: 30,
        }
    }
}

impl StorageConfig {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

/// The catalog store: sole owner and writer of the persisted product set.
///
/// There is deliberately no update operation; the product lifecycle has only
/// creation and deletion.
#[async_trait]
pub trait ProductoStorage: Send + Sync {
    /// Apply the schema. Must be called once before any other operation.
    async fn initialize(&self) -> StorageResult<()>;

    /// Persist a new product and return the stored record, including the
    /// freshly assigned id. Ids are monotonically increasing and never
    /// reused, even after deletion.
    async fn create_producto(&self, input: ProductoCreateInput) -> StorageResult<Producto>;

    /// All persisted products, in insertion order.
    async fn list_productos(&self) -> StorageResult<Vec<Producto>>;

    /// Remove the product with the given id. Reports `NotFound` when no such
    /// product exists -- including on a repeated delete of the same id.
    async fn delete_producto(&self, id: i64) -> StorageResult<()>;
}
