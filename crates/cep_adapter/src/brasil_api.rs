//! BrasilAPI adapter: `GET {base}/{code}`.

use crate::error::Result;
use crate::http::{build_client, get_json};
use crate::provider::Provider;
use crate::types::{normalize_code, Address};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

pub const NAME: &str = "BrasilAPI";

#[derive(Debug, Deserialize)]
struct BrasilApiResponse {
    #[serde(default)]
    cep: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    neighborhood: String,
    #[serde(default)]
    street: String,
}

#[derive(Debug, Clone)]
pub struct BrasilApi {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl BrasilApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    fn url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }
}

#[async_trait]
impl Provider for BrasilApi {
    async fn fetch(&self, code: &str) -> Result<Address> {
        let resp: BrasilApiResponse =
            get_json(&self.client, NAME, &self.url(code), self.timeout).await?;
        Ok(Address {
            code: normalize_code(&resp.cep, code),
            street: resp.street,
            neighborhood: resp.neighborhood,
            city: resp.city,
            state: resp.state,
            source: NAME.to_string(),
        })
    }

    fn name(&self) -> &str {
        NAME
    }
}
