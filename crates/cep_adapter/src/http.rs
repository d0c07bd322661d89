//! Shared HTTP plumbing for the lookup adapters.
//!
//! Every adapter performs exactly one GET per lookup and expects a JSON body.
//! Classification rules:
//! - transport failures map to `Http`, elapsed request timeouts to `Timeout`
//! - any status other than 200 maps to `Status` with a truncated body
//! - bodies above `MAX_RESPONSE_BYTES` are refused without being buffered
//!
//! No retries happen here or anywhere above.

use crate::error::{AdapterError, Result};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Upper bound on an accepted response body.
pub const MAX_RESPONSE_BYTES: usize = 64 * 1024;

/// How much of an error body is kept for diagnostics.
const ERROR_BODY_PREVIEW: usize = 256;

/// Build the client an adapter keeps for its whole life.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AdapterError::Http(e.to_string()))
}

/// GET `url` and decode the JSON body as `T`.
pub async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    adapter: &str,
    url: &str,
    timeout: Duration,
) -> Result<T> {
    debug!(adapter, url, "GET");
    let classify = |e: reqwest::Error| {
        if e.is_timeout() {
            AdapterError::Timeout {
                adapter: adapter.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            }
        } else {
            AdapterError::Http(e.to_string())
        }
    };

    let mut resp = client.get(url).send().await.map_err(classify)?;
    let status = resp.status().as_u16();

    if status != 200 {
        // Enough bytes for the preview even if every char is four bytes wide.
        let (body, _) = read_capped(&mut resp, ERROR_BODY_PREVIEW * 4)
            .await
            .map_err(classify)?;
        return Err(AdapterError::Status {
            status,
            body: preview(&body),
        });
    }

    if let Some(len) = resp.content_length().filter(|&n| n > MAX_RESPONSE_BYTES as u64) {
        return Err(too_large(Some(len)));
    }

    let (body, truncated) = read_capped(&mut resp, MAX_RESPONSE_BYTES)
        .await
        .map_err(classify)?;
    if truncated {
        return Err(too_large(None));
    }

    Ok(serde_json::from_slice(&body)?)
}

/// Read at most `cap` bytes of the body. The flag is set when more was on offer.
async fn read_capped(
    resp: &mut reqwest::Response,
    cap: usize,
) -> std::result::Result<(Vec<u8>, bool), reqwest::Error> {
    let mut buf = Vec::new();
    while let Some(chunk) = resp.chunk().await? {
        let room = cap - buf.len();
        if chunk.len() > room {
            buf.extend_from_slice(&chunk[..room]);
            return Ok((buf, true));
        }
        buf.extend_from_slice(&chunk);
    }
    Ok((buf, false))
}

fn too_large(declared: Option<u64>) -> AdapterError {
    let msg = match declared {
        Some(len) => format!("response too large: {len} bytes (max {MAX_RESPONSE_BYTES})"),
        None => format!("response too large: over {MAX_RESPONSE_BYTES} bytes"),
    };
    AdapterError::Http(msg)
}

fn preview(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    match text.char_indices().nth(ERROR_BODY_PREVIEW) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}
