//! No-WASM HTTP client implementation using reqwest
//!
//! This module provides HTTP functionality for non-WASM environments
//! using the reqwest crate for making HTTP requests.

use reqwest::{Client, Response};

use crate::client::endpoints::Endpoints;
use crate::config::ClientConfig;
use crate::error::{ErrorKind, Result};
use crate::interface::{HttpClient, RequestApi};
use crate::model::{ApiOutcome, Directory, SignupParams, UnregisterParams};

/// HTTP client for no-WASM environments using reqwest
#[derive(Debug, Clone)]
pub struct NoWasmClient {
    client: Client,
    endpoints: Endpoints,
}

impl HttpClient for NoWasmClient {
    async fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("activity-signup/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoints: Endpoints::new(config.base_url.clone()),
        })
    }
}

impl NoWasmClient {
    async fn read_outcome(resp: Response) -> Result<ApiOutcome> {
        let status = resp.status();
        let text = resp.text().await?;
        log::debug!("Response status: {status}, {} bytes", text.len());

        ApiOutcome::from_response(status.as_u16(), &text)
    }
}

impl RequestApi for NoWasmClient {
    async fn get_activities(&self) -> Result<Directory> {
        let url = self.endpoints.activities()?;
        log::debug!("GET {url}");

        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ErrorKind::HttpStatus(status.as_u16()).into());
        }

        let text = resp.text().await?;
        Directory::from_json_str(&text)
    }

    async fn signup(&self, params: SignupParams) -> Result<ApiOutcome> {
        let url = self.endpoints.signup(&params.activity, &params.email)?;
        log::debug!("POST {url}");

        let resp = self.client.post(url).send().await?;
        Self::read_outcome(resp).await
    }

    async fn unregister(&self, params: UnregisterParams) -> Result<ApiOutcome> {
        let url = self.endpoints.unregister(&params.activity, &params.email)?;
        log::debug!("DELETE {url}");

        let resp = self.client.delete(url).send().await?;
        Self::read_outcome(resp).await
    }
}
