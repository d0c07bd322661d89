pub mod api;
pub mod error;

use axum::{routing::get, Json, Router};
use cep_runtime::Resolver;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;

/// Headroom the request timeout leaves above the resolver deadline, so a
/// lookup that runs out of time still answers with its own 504 body.
const REQUEST_MARGIN: Duration = Duration::from_secs(1);

fn request_timeout(deadline: Duration) -> Duration {
    deadline.saturating_add(REQUEST_MARGIN)
}

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<Resolver>,
}

pub fn app(resolver: Resolver) -> Router {
    let timeout = request_timeout(resolver.deadline());
    let state = AppState {
        resolver: Arc::new(resolver),
    };
    Router::new()
        .route("/healthz", get(healthz))
        .route("/v1/cep/:code", get(api::lookup))
        .layer(TimeoutLayer::new(timeout))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn healthz() -> Json<serde_json::Value> {
    Json(json!({"ok": true}))
}

pub mod test {
    use cep_runtime::Resolver;
    use std::net::SocketAddr;
    use tokio::net::TcpListener;

    /// Spawn the server on a random port. Returns the address and a
    /// JoinHandle that keeps the server alive until dropped.
    pub async fn spawn(resolver: Resolver) -> (SocketAddr, tokio::task::JoinHandle<()>) {
        let app = super::app(resolver);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (addr, handle)
    }
}
