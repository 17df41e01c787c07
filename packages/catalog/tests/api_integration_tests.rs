// ABOUTME: End-to-end tests for the productos API over a real SQLite database
// ABOUTME: Exercises the create/list/delete lifecycle through the router

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use bodega_catalog::{ApiState, ProductoStorage, SqliteStorage, StorageConfig};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

async fn setup_app() -> (Router, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let storage = SqliteStorage::new(StorageConfig::with_path(temp_dir.path().join("bodega.db")))
        .await
        .expect("Failed to create storage");
    storage.initialize().await.expect("Failed to run migrations");
    let app = bodega_catalog::create_productos_router(ApiState::new(Arc::new(storage)));
    (app, temp_dir)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn full_product_lifecycle() {
    let (app, _dir) = setup_app().await;

    // Create
    let response = app
        .clone()
        .oneshot(post_json(
            "/productos",
            json!({"nombre": "Silla", "precio": 49.99, "estado": "Disponible"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["data"]["id"].as_i64().unwrap();
    assert!(id > 0);
    assert_eq!(created["data"]["nombre"], "Silla");

    // The list contains the stored record
    let response = app.clone().oneshot(get("/productos")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    assert_eq!(listed["message"], "success");
    let data = listed["data"].as_array().unwrap();
    assert!(data.iter().any(|p| p["id"].as_i64() == Some(id)));

    // Delete it
    let response = app
        .clone()
        .oneshot(delete(&format!("/items/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let deleted = body_json(response).await;
    assert_eq!(deleted["message"], "Producto eliminado con éxito");
    assert_eq!(deleted["id"].as_i64(), Some(id));

    // A repeated delete reports the absence
    let response = app
        .oneshot(delete(&format!("/items/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Producto no encontrado.");
}

#[tokio::test]
async fn rejected_create_leaves_the_catalog_unchanged() {
    let (app, _dir) = setup_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/productos",
            json!({"nombre": "Silla", "estado": "Disponible"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let listed = body_json(app.oneshot(get("/productos")).await.unwrap()).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn list_preserves_insertion_order_across_mutations() {
    let (app, _dir) = setup_app().await;

    let mut ids = Vec::new();
    for nombre in ["Silla", "Mesa", "Banco"] {
        let response = app
            .clone()
            .oneshot(post_json(
                "/productos",
                json!({"nombre": nombre, "precio": 10.0, "estado": "Disponible"}),
            ))
            .await
            .unwrap();
        ids.push(body_json(response).await["data"]["id"].as_i64().unwrap());
    }

    // Remove the middle product; the remaining order is unchanged
    app.clone()
        .oneshot(delete(&format!("/items/{}", ids[1])))
        .await
        .unwrap();

    let listed = body_json(app.oneshot(get("/productos")).await.unwrap()).await;
    let names: Vec<&str> = listed["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["nombre"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Silla", "Banco"]);
}
