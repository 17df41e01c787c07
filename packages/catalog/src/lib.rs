//! Bodega catalog: product types, the SQLite-backed store and the HTTP API
//! layered on it.
//!
//! The store is the only writer of persisted state; the API is a stateless
//! translation layer that maps one request to one store call.

pub mod api;
pub mod storage;
pub mod types;

pub use api::{create_productos_router, ApiState};
pub use storage::sqlite::SqliteStorage;
pub use storage::{ProductoStorage, StorageConfig, StorageError, StorageResult};
pub use types::{EstadoProducto, Producto, ProductoCreateInput};
