//! Bodega TUI - Terminal client for the Bodega product catalog
//!
//! Drives three screens (list, creation form, product details) against the
//! catalog API, refetching the product list after every successful mutation.

pub mod api;
pub mod app;
pub mod camera;
pub mod events;
pub mod state;
pub mod ui;

pub use app::App;
pub use state::AppState;
