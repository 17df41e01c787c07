use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
    Json,
};
use tracing::{error, info};

use super::response::{DataResponse, DeleteResponse, ErrorResponse};
use super::ApiState;
use crate::storage::StorageError;
use crate::types::ProductoCreateInput;

pub(crate) const MISSING_FIELDS_ERROR: &str =
    "Faltan campos obligatorios: nombre, precio y estado.";

/// List all productos
pub async fn list_productos(State(state): State<ApiState>) -> impl IntoResponse {
    info!("Listing all productos");

    match state.storage.list_productos().await {
        Ok(productos) => {
            info!("Retrieved {} productos", productos.len());
            (
                StatusCode::OK,
                ResponseJson(DataResponse {
                    message: "success".to_string(),
                    data: productos,
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to list productos: {}", e);
            e.into_response()
        }
    }
}

/// Create a new producto
pub async fn create_producto(
    State(state): State<ApiState>,
    Json(input): Json<ProductoCreateInput>,
) -> impl IntoResponse {
    // Presence check only; the estado literal is enforced by the store.
    if input.missing_required() {
        info!("Rejected producto creation: missing required fields");
        return (
            StatusCode::BAD_REQUEST,
            ResponseJson(ErrorResponse {
                error: MISSING_FIELDS_ERROR.to_string(),
            }),
        )
            .into_response();
    }

    match state.storage.create_producto(input).await {
        Ok(producto) => {
            info!("Created producto '{}' (ID: {})", producto.nombre, producto.id);
            (
                StatusCode::CREATED,
                ResponseJson(DataResponse {
                    message: "Producto creado con éxito".to_string(),
                    data: producto,
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to create producto: {}", e);
            e.into_response()
        }
    }
}

/// Delete a producto by id
pub async fn delete_producto(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    // A non-numeric segment matches no product; same outcome as an unknown id.
    let id = match id.parse::<i64>() {
        Ok(id) => id,
        Err(_) => {
            info!("Delete target is not a valid id: {}", id);
            return StorageError::NotFound.into_response();
        }
    };

    match state.storage.delete_producto(id).await {
        Ok(()) => {
            info!("Deleted producto: {}", id);
            (
                StatusCode::OK,
                ResponseJson(DeleteResponse {
                    message: "Producto eliminado con éxito".to_string(),
                    id,
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to delete producto {}: {}", id, e);
            e.into_response()
        }
    }
}
