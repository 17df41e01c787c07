use bodega_catalog::{Producto, ProductoCreateInput};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

/// Errors from talking to the catalog API. The controller alerts `Server`
/// messages verbatim and substitutes a generic message for `Transport`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with an `{"error": ...}` payload.
    #[error("{0}")]
    Server(String),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

// Success envelopes declare only the fields the client consumes.
#[derive(Deserialize)]
struct ListEnvelope {
    data: Vec<Producto>,
}

#[derive(Deserialize)]
struct CreateEnvelope {
    data: Producto,
}

#[derive(Deserialize)]
struct DeleteEnvelope {
    id: i64,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: String,
}

/// HTTP API client for communicating with the Bodega catalog server
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Get all productos
    pub async fn fetch_productos(&self) -> Result<Vec<Producto>, ApiError> {
        let response = self
            .client
            .get(format!("{}/productos", self.base_url))
            .send()
            .await?;

        let envelope: ListEnvelope = Self::decode(response).await?;
        Ok(envelope.data)
    }

    /// Create a producto and return the stored record
    pub async fn create_producto(
        &self,
        input: &ProductoCreateInput,
    ) -> Result<Producto, ApiError> {
        let response = self
            .client
            .post(format!("{}/productos", self.base_url))
            .json(input)
            .send()
            .await?;

        let envelope: CreateEnvelope = Self::decode(response).await?;
        Ok(envelope.data)
    }

    /// Delete a producto by id
    pub async fn delete_producto(&self, id: i64) -> Result<i64, ApiError> {
        let response = self
            .client
            .delete(format!("{}/items/{}", self.base_url, id))
            .send()
            .await?;

        let envelope: DeleteEnvelope = Self::decode(response).await?;
        Ok(envelope.id)
    }

    /// Decode a success envelope, or surface the server's error message.
    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        if response.status().is_success() {
            Ok(response.json::<T>().await?)
        } else {
            let status = response.status();
            match response.json::<ErrorEnvelope>().await {
                Ok(body) => Err(ApiError::Server(body.error)),
                Err(_) => Err(ApiError::Server(format!("HTTP {}", status))),
            }
        }
    }
}
