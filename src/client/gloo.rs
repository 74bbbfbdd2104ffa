//! WASM HTTP client implementation using gloo_net
//!
//! This module provides HTTP functionality for WASM environments
//! using the gloo_net crate for making HTTP requests via the browser's fetch API.

use gloo_net::http::{Request, RequestBuilder, Response};

use crate::client::endpoints::Endpoints;
use crate::config::ClientConfig;
use crate::error::{ErrorKind, Result};
use crate::interface::{HttpClient, RequestApi};
use crate::model::{ApiOutcome, Directory, SignupParams, UnregisterParams};

/// HTTP client for WASM environments using gloo_net
#[derive(Debug, Clone)]
pub struct WasmClient {
    endpoints: Endpoints,
}

impl HttpClient for WasmClient {
    async fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            endpoints: Endpoints::new(config.base_url.clone()),
        })
    }
}

impl WasmClient {
    fn build_request(builder: RequestBuilder) -> RequestBuilder {
        builder.header("Accept", "application/json")
    }

    async fn read_outcome(resp: Response) -> Result<ApiOutcome> {
        let status = resp.status();
        let text = resp.text().await?;

        log::debug!("Response status: {:?}", status);
        log::debug!("Response length: {}", text.len());

        ApiOutcome::from_response(status, &text)
    }
}

impl RequestApi for WasmClient {
    async fn get_activities(&self) -> Result<Directory> {
        let url = self.endpoints.activities()?;

        let resp = Self::build_request(Request::get(url.as_str())).send().await?;
        if !resp.ok() {
            return Err(ErrorKind::HttpStatus(resp.status()).into());
        }

        let text = resp.text().await?;
        Directory::from_json_str(&text)
    }

    async fn signup(&self, params: SignupParams) -> Result<ApiOutcome> {
        let url = self.endpoints.signup(&params.activity, &params.email)?;
        log::debug!("POST {}", url);

        let resp = Self::build_request(Request::post(url.as_str())).send().await?;
        Self::read_outcome(resp).await
    }

    async fn unregister(&self, params: UnregisterParams) -> Result<ApiOutcome> {
        let url = self.endpoints.unregister(&params.activity, &params.email)?;
        log::debug!("DELETE {}", url);

        let resp = Self::build_request(Request::delete(url.as_str())).send().await?;
        Self::read_outcome(resp).await
    }
}
