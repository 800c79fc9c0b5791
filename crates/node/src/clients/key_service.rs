use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use url::Url;

use crate::app::KeyFetcher;

use super::error::ClientError;

/// Per-call deadline for key directory requests.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the public-key directory service.
///
/// Keys live at `GET {base}/keys/{user_id}` as PEM bodies; registration is
/// a `POST` to the same path answering `201 Created`.
#[derive(Debug, Clone)]
pub struct KeyServiceClient {
    base: Url,
    client: Client,
}

impl KeyServiceClient {
    pub fn new(base: &Url) -> Result<Self, ClientError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/octet-stream"),
        );
        let client = Client::builder()
            .default_headers(default_headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            base: base.clone(),
            client,
        })
    }

    fn key_url(&self, user_id: &str) -> Result<Url, ClientError> {
        Ok(self.base.join(&format!("keys/{user_id}"))?)
    }

    /// Upload a user's public key.
    pub async fn store_key(&self, user_id: &str, public_key_pem: &[u8]) -> Result<(), ClientError> {
        let url = self.key_url(user_id)?;
        let response = self.client.post(url).body(public_key_pem.to_vec()).send().await?;

        if response.status() != StatusCode::CREATED {
            return Err(ClientError::HttpStatus(
                response.status(),
                response.text().await?,
            ));
        }
        tracing::info!(user_id, "stored public key");
        Ok(())
    }
}

#[async_trait]
impl KeyFetcher for KeyServiceClient {
    async fn get_key(&self, user_id: &str) -> Result<Vec<u8>, ClientError> {
        let url = self.key_url(user_id)?;
        let response = self.client.get(url).send().await?;

        match response.status() {
            StatusCode::OK => {
                let key = response.bytes().await?.to_vec();
                tracing::info!(user_id, "fetched public key");
                Ok(key)
            }
            StatusCode::NOT_FOUND => Err(ClientError::KeyNotFound(user_id.to_string())),
            status => Err(ClientError::HttpStatus(status, response.text().await?)),
        }
    }
}
