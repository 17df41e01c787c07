use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::storage::ProductoStorage;

pub mod handlers;
pub mod response;

/// Storage handle injected into every request handler. The API layer holds
/// no other state.
#[derive(Clone)]
pub struct ApiState {
    pub storage: Arc<dyn ProductoStorage>,
}

impl ApiState {
    pub fn new(storage: Arc<dyn ProductoStorage>) -> Self {
        Self { storage }
    }
}

/// Creates the productos API router
pub fn create_productos_router(state: ApiState) -> Router {
    Router::new()
        .route("/productos", get(handlers::list_productos))
        .route("/productos", post(handlers::create_producto))
        .route("/items/{id}", delete(handlers::delete_producto))
        .with_state(state)
}
