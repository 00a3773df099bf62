use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Product, ProductId},
    error::ErrorBody,
    protocol::ProductPayload,
};
use tracing::debug;
use url::Url;

use crate::error::ClientError;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api/";

/// The four operations the editor needs from the remote product collection.
#[async_trait]
pub trait ProductApi: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>, ClientError>;
    async fn create_product(&self, payload: &ProductPayload) -> Result<Product, ClientError>;
    async fn update_product(
        &self,
        id: ProductId,
        payload: &ProductPayload,
    ) -> Result<Product, ClientError>;
    async fn delete_product(&self, id: ProductId) -> Result<(), ClientError>;
}

pub struct HttpProductApi {
    http: Client,
    base_url: Url,
}

impl HttpProductApi {
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ClientError::Transport {
                url: base_url.to_string(),
                source,
            })?;
        Self::with_client(http, base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn collection_url(&self) -> Result<Url, ClientError> {
        self.join("products/")
    }

    pub fn resource_url(&self, id: ProductId) -> Result<Url, ClientError> {
        self.join(&format!("products/{}/", id.0))
    }

    fn join(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|source| ClientError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                source,
            })
    }

    async fn send(&self, request: RequestBuilder, url: &Url) -> Result<Response, ClientError> {
        let response = request
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = ErrorBody::parse(&body)
            .map(|body| body.summary())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
        Err(ClientError::Status {
            url: url.to_string(),
            status,
            detail,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response, url: &Url) -> Result<T, ClientError> {
        response
            .json()
            .await
            .map_err(|source| ClientError::Decode {
                url: url.to_string(),
                source,
            })
    }
}

#[async_trait]
impl ProductApi for HttpProductApi {
    async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        let url = self.collection_url()?;
        debug!(%url, "listing products");
        let response = self.send(self.http.get(url.clone()), &url).await?;
        Self::decode(response, &url).await
    }

    async fn create_product(&self, payload: &ProductPayload) -> Result<Product, ClientError> {
        let url = self.collection_url()?;
        debug!(%url, name = %payload.name, "creating product");
        let response = self
            .send(self.http.post(url.clone()).json(payload), &url)
            .await?;
        Self::decode(response, &url).await
    }

    async fn update_product(
        &self,
        id: ProductId,
        payload: &ProductPayload,
    ) -> Result<Product, ClientError> {
        let url = self.resource_url(id)?;
        debug!(%url, product_id = id.0, "updating product");
        let response = self
            .send(self.http.put(url.clone()).json(payload), &url)
            .await?;
        Self::decode(response, &url).await
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), ClientError> {
        let url = self.resource_url(id)?;
        debug!(%url, product_id = id.0, "deleting product");
        // The body of a successful delete is ignored.
        self.send(self.http.delete(url.clone()), &url).await?;
        Ok(())
    }
}

/// Parses the configured base URL, forcing a trailing slash so relative joins
/// keep the `/api` prefix.
fn normalize_base_url(raw: &str) -> Result<Url, ClientError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    Url::parse(&with_slash).map_err(|source| ClientError::InvalidBaseUrl {
        url: raw.to_string(),
        source,
    })
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
