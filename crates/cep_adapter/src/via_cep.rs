//! ViaCEP adapter: `GET {base}/{code}/json/`.
//!
//! ViaCEP answers 200 for unknown codes and flags them with `"erro"`, which
//! arrives either as a boolean or as the string `"true"`.

use crate::error::{AdapterError, Result};
use crate::http::{build_client, get_json};
use crate::provider::Provider;
use crate::types::{normalize_code, Address};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

pub const NAME: &str = "ViaCEP";

#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    #[serde(default)]
    cep: String,
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
    #[serde(default)]
    erro: Option<Value>,
}

impl ViaCepResponse {
    fn not_found(&self) -> bool {
        match &self.erro {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ViaCep {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl ViaCep {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    fn url(&self, code: &str) -> String {
        format!("{}/{}/json/", self.base_url, code)
    }
}

#[async_trait]
impl Provider for ViaCep {
    async fn fetch(&self, code: &str) -> Result<Address> {
        let resp: ViaCepResponse =
            get_json(&self.client, NAME, &self.url(code), self.timeout).await?;
        if resp.not_found() {
            return Err(AdapterError::NotFound);
        }
        Ok(Address {
            code: normalize_code(&resp.cep, code),
            street: resp.logradouro,
            neighborhood: resp.bairro,
            city: resp.localidade,
            state: resp.uf,
            source: NAME.to_string(),
        })
    }

    fn name(&self) -> &str {
        NAME
    }
}
