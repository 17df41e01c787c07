use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{migrate::MigrateDatabase, Row};
use tracing::{debug, info};

use super::{ProductoStorage, StorageConfig, StorageError, StorageResult};
use crate::types::{EstadoProducto, Producto, ProductoCreateInput};
use async_trait::async_trait;

/// SQLite implementation of ProductoStorage
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Create a new SqliteStorage instance
    pub async fn new(config: StorageConfig) -> StorageResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(StorageError::Io)?;
            }
        }

        let database_url = format!("sqlite:{}", config.path.display());

        // Create database if it doesn't exist
        if !sqlx::Sqlite::database_exists(&database_url)
            .await
            .map_err(StorageError::Sqlx)?
        {
            debug!("Creating database at: {}", database_url);
            sqlx::Sqlite::create_database(&database_url)
                .await
                .map_err(StorageError::Sqlx)?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(std::time::Duration::from_secs(config.busy_timeout_seconds))
            .connect(&database_url)
            .await
            .map_err(StorageError::Sqlx)?;

        // SQLite serializes writers; WAL keeps readers from blocking on them.
        sqlx::query("PRAGMA journal_mode = WAL")
            .execute(&pool)
            .await
            .map_err(StorageError::Sqlx)?;

        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&pool)
            .await
            .map_err(StorageError::Sqlx)?;

        sqlx::query("PRAGMA synchronous = NORMAL")
            .execute(&pool)
            .await
            .map_err(StorageError::Sqlx)?;

        Ok(Self { pool })
    }

    /// Convert a database row to a Producto
    fn row_to_producto(&self, row: &SqliteRow) -> StorageResult<Producto> {
        let estado_str: String = row.try_get("estado")?;
        let estado = match estado_str.as_str() {
            "Disponible" => EstadoProducto::Disponible,
            "No disponible" => EstadoProducto::NoDisponible,
            other => {
                return Err(StorageError::Database(format!(
                    "Invalid estado value in row: {}",
                    other
                )))
            }
        };

        Ok(Producto {
            id: row.try_get("id")?,
            nombre: row.try_get("nombre")?,
            descripcion: row.try_get("descripcion")?,
            precio: row.try_get("precio")?,
            estado,
            categoria: row.try_get("categoria")?,
            url_fotografia: row.try_get("url_fotografia")?,
        })
    }

    async fn fetch_producto(&self, id: i64) -> StorageResult<Option<Producto>> {
        let row = sqlx::query("SELECT * FROM productos WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        match row {
            Some(row) => Ok(Some(self.row_to_producto(&row)?)),
            None => Ok(None),
        }
    }
}

// SQLITE_CONSTRAINT_CHECK and SQLITE_CONSTRAINT_NOTNULL extended codes.
const SQLITE_CONSTRAINT_CODES: [&str; 2] = ["275", "1299"];

#[async_trait]
impl ProductoStorage for SqliteStorage {
    async fn initialize(&self) -> StorageResult<()> {
        info!("Initializing SQLite storage with migrations");

        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(StorageError::Migration)?;

        Ok(())
    }

    async fn create_producto(&self, input: ProductoCreateInput) -> StorageResult<Producto> {
        let result = sqlx::query(
            r#"
            INSERT INTO productos (nombre, descripcion, precio, estado, categoria, url_fotografia)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.nombre)
        .bind(&input.descripcion)
        .bind(input.precio)
        .bind(&input.estado)
        .bind(&input.categoria)
        .bind(&input.url_fotografia)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => {
                let id = done.last_insert_rowid();
                debug!("Created producto with ID {}", id);
                self.fetch_producto(id).await?.ok_or(StorageError::NotFound)
            }
            Err(sqlx::Error::Database(db_err)) => {
                // CHECK (bad estado literal) and NOT NULL (missing required
                // column) violations are schema constraints, not I/O faults.
                let is_constraint = db_err
                    .code()
                    .map(|code| SQLITE_CONSTRAINT_CODES.contains(&code.as_ref()))
                    .unwrap_or(false)
                    || db_err.message().contains("constraint failed");
                if is_constraint {
                    return Err(StorageError::Constraint(db_err.message().to_string()));
                }
                Err(StorageError::Sqlx(sqlx::Error::Database(db_err)))
            }
            Err(e) => Err(StorageError::Sqlx(e)),
        }
    }

    async fn list_productos(&self) -> StorageResult<Vec<Producto>> {
        // No ORDER BY: rowid scan order is insertion order for this table,
        // and the wire contract promises exactly that.
        let rows = sqlx::query("SELECT * FROM productos")
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        let mut productos = Vec::new();
        for row in rows {
            productos.push(self.row_to_producto(&row)?);
        }

        debug!("Retrieved {} productos", productos.len());
        Ok(productos)
    }

    async fn delete_producto(&self, id: i64) -> StorageResult<()> {
        let result = sqlx::query("DELETE FROM productos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        debug!("Deleted producto {}", id);
        Ok(())
    }
}
