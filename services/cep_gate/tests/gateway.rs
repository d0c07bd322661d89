use cep_runtime::testing::StubProvider;
use cep_runtime::Resolver;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

async fn setup(providers: Vec<StubProvider>, deadline: Duration) -> (String, Client, tokio::task::JoinHandle<()>) {
    let resolver = Resolver::new(providers.into_iter().map(StubProvider::into_arc).collect())
        .with_deadline(deadline);
    let (addr, handle) = cep_gate::test::spawn(resolver).await;
    (format!("http://{addr}"), Client::new(), handle)
}

#[tokio::test]
async fn healthz_is_ok() {
    let (base, http, _h) = setup(vec![], ms(100)).await;
    let health: Value = http.get(format!("{base}/healthz"))
        .send().await.unwrap()
        .json().await.unwrap();
    assert_eq!(health["ok"], true);
}

#[tokio::test]
async fn lookup_returns_fastest_address() {
    let (base, http, _h) = setup(
        vec![StubProvider::found("A", ms(10)), StubProvider::found("B", ms(300))],
        ms(1000),
    ).await;

    let resp = http.get(format!("{base}/v1/cep/01153-000")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["address"]["code"], "01153000");
    assert_eq!(body["address"]["source"], "A");
    assert_eq!(body["address"]["state"], "SP");
    assert!(body["elapsed_ms"].as_u64().unwrap() < 300);
    assert!(body["resolved_at"].as_str().unwrap().contains('T'));
}

#[tokio::test]
async fn malformed_code_is_400_without_lookup() {
    let stub = StubProvider::found("A", ms(10));
    let (base, http, _h) = setup(vec![stub.clone()], ms(1000)).await;

    let resp = http.get(format!("{base}/v1/cep/1234")).send().await.unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "bad_request");
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn all_failed_is_502_with_first_provider() {
    let (base, http, _h) = setup(
        vec![
            StubProvider::failing("Second", ms(60), "API error 2"),
            StubProvider::not_found("First", ms(10)),
        ],
        ms(1000),
    ).await;

    let resp = http.get(format!("{base}/v1/cep/00000000")).send().await.unwrap();
    assert_eq!(resp.status(), 502);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "all_providers_failed");
    assert_eq!(body["provider"], "First");
    assert!(body["message"].as_str().unwrap().contains("not found"), "body: {body}");
}

#[tokio::test]
async fn slow_providers_are_504() {
    let (base, http, _h) = setup(
        vec![StubProvider::found("A", ms(2000)), StubProvider::found("B", ms(2000))],
        ms(200),
    ).await;

    let started = std::time::Instant::now();
    let resp = http.get(format!("{base}/v1/cep/01153000")).send().await.unwrap();
    assert_eq!(resp.status(), 504);
    assert!(started.elapsed() < ms(1000));
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "timeout");
    assert!(body.get("provider").is_none());
}

#[tokio::test]
async fn long_deadline_times_out_with_json_body() {
    let (base, http, _h) = setup(vec![StubProvider::found("A", ms(4000))], ms(1500)).await;

    let resp = http.get(format!("{base}/v1/cep/01153000")).send().await.unwrap();
    assert_eq!(resp.status(), 504);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "timeout");
}
