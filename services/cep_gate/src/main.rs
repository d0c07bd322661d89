use cep_config::Settings;
use cep_runtime::Resolver;
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::net::TcpListener;
use tracing::{info, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .compact()
        .init();

    let settings = Settings::load()?;
    if let Some(addr) = settings.metrics_addr {
        PrometheusBuilder::new().with_http_listener(addr).install()?;
        info!("metrics on {addr}");
    }

    let resolver = Resolver::from_settings(&settings)?;
    info!(
        providers = ?resolver.providers(),
        deadline_ms = resolver.deadline().as_millis() as u64,
        "resolver ready"
    );

    let app = cep_gate::app(resolver);
    let listener = TcpListener::bind(settings.gate_addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
