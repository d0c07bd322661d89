use crate::{error::AppError, AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use cep_runtime::{Address, Code, ResolveError};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::info;

#[derive(Debug, Serialize)]
pub struct LookupResponse {
    pub address: Address,
    pub elapsed_ms: u64,
    pub resolved_at: String,
}

pub async fn lookup(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<LookupResponse>, AppError> {
    let code = Code::parse(&raw).map_err(|e| {
        record("invalid", None, Duration::ZERO);
        AppError::from(e)
    })?;

    let started = Instant::now();
    let result = state.resolver.resolve(code.as_str()).await;
    let elapsed = started.elapsed();

    match &result {
        Ok(address) => {
            record("resolved", Some(address.source.as_str()), elapsed);
            info!(code = %code, source = %address.source, elapsed_ms = elapsed.as_millis() as u64, "lookup");
        }
        Err(ResolveError::AllFailed { .. }) => record("all_failed", None, elapsed),
        Err(ResolveError::Timeout { .. }) => record("timeout", None, elapsed),
        Err(ResolveError::InvalidInput(_)) => record("invalid", None, elapsed),
    }

    let address = result?;
    Ok(Json(LookupResponse {
        address,
        elapsed_ms: elapsed.as_millis() as u64,
        resolved_at: chrono::Utc::now().to_rfc3339(),
    }))
}

fn record(outcome: &'static str, source: Option<&str>, elapsed: Duration) {
    metrics::counter!("cep_resolve_total", "outcome" => outcome).increment(1);
    if let Some(source) = source {
        metrics::counter!("cep_resolve_source_total", "source" => source.to_string()).increment(1);
    }
    if outcome != "invalid" {
        metrics::histogram!("cep_resolve_duration_seconds").record(elapsed.as_secs_f64());
    }
}
