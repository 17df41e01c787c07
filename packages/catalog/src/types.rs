use serde::{Deserialize, Serialize};
use std::fmt;

/// Availability of a product. Serialized as the exact wire literals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EstadoProducto {
    Disponible,
    #[serde(rename = "No disponible")]
    NoDisponible,
}

impl Default for EstadoProducto {
    fn default() -> Self {
        EstadoProducto::Disponible
    }
}

impl EstadoProducto {
    pub fn as_str(&self) -> &'static str {
        match self {
            EstadoProducto::Disponible => "Disponible",
            EstadoProducto::NoDisponible => "No disponible",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            EstadoProducto::Disponible => EstadoProducto::NoDisponible,
            EstadoProducto::NoDisponible => EstadoProducto::Disponible,
        }
    }
}

impl fmt::Display for EstadoProducto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A catalog product. Field names are the wire-level names and must not be
/// renamed; existing consumers depend on them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Producto {
    pub id: i64,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub precio: f64,
    pub estado: EstadoProducto,
    pub categoria: Option<String>,
    pub url_fotografia: Option<String>,
}

/// Input for creating a product. Every field is optional at this layer:
/// presence of `nombre`/`precio`/`estado` is checked by the API, and `estado`
/// stays a raw string so that bad literals reach the store's CHECK constraint
/// instead of failing JSON decoding.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductoCreateInput {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub precio: Option<f64>,
    pub estado: Option<String>,
    pub categoria: Option<String>,
    pub url_fotografia: Option<String>,
}

impl ProductoCreateInput {
    /// True when any required field is absent. Empty-string `nombre` or
    /// `estado` counts as absent.
    pub fn missing_required(&self) -> bool {
        self.nombre.as_deref().map_or(true, str::is_empty)
            || self.precio.is_none()
            || self.estado.as_deref().map_or(true, str::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estado_serializes_as_wire_literals() {
        assert_eq!(
            serde_json::to_string(&EstadoProducto::Disponible).unwrap(),
            "\"Disponible\""
        );
        assert_eq!(
            serde_json::to_string(&EstadoProducto::NoDisponible).unwrap(),
            "\"No disponible\""
        );
    }

    #[test]
    fn estado_rejects_free_text() {
        assert!(serde_json::from_str::<EstadoProducto>("\"Agotado\"").is_err());
    }

    #[test]
    fn missing_required_detects_each_field() {
        let full = ProductoCreateInput {
            nombre: Some("Silla".to_string()),
            precio: Some(49.99),
            estado: Some("Disponible".to_string()),
            ..Default::default()
        };
        assert!(!full.missing_required());

        let mut sin_nombre = full.clone();
        sin_nombre.nombre = None;
        assert!(sin_nombre.missing_required());

        let mut nombre_vacio = full.clone();
        nombre_vacio.nombre = Some(String::new());
        assert!(nombre_vacio.missing_required());

        let mut sin_precio = full.clone();
        sin_precio.precio = None;
        assert!(sin_precio.missing_required());

        let mut sin_estado = full;
        sin_estado.estado = None;
        assert!(sin_estado.missing_required());
    }
}
