//! Controllable providers for exercising the race without a network.

use async_trait::async_trait;
use cep_adapter::{AdapterError, Address, Provider};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
enum Reply {
    Found,
    Empty,
    NotFound,
    Http(String),
    Panic,
}

/// Sleeps for `delay` (on the tokio clock) and then answers with a canned reply.
#[derive(Debug, Clone)]
pub struct StubProvider {
    name: String,
    delay: Duration,
    reply: Reply,
    calls: Arc<AtomicUsize>,
}

impl StubProvider {
    fn new(name: &str, delay: Duration, reply: Reply) -> Self {
        Self {
            name: name.to_string(),
            delay,
            reply,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Answers with an address whose `source` is `name`.
    pub fn found(name: &str, delay: Duration) -> Self {
        Self::new(name, delay, Reply::Found)
    }

    /// Answers `Ok` with an address that has no code.
    pub fn empty(name: &str, delay: Duration) -> Self {
        Self::new(name, delay, Reply::Empty)
    }

    pub fn not_found(name: &str, delay: Duration) -> Self {
        Self::new(name, delay, Reply::NotFound)
    }

    pub fn failing(name: &str, delay: Duration, message: &str) -> Self {
        Self::new(name, delay, Reply::Http(message.to_string()))
    }

    /// Panics instead of answering, so it never reports.
    pub fn panicking(name: &str, delay: Duration) -> Self {
        Self::new(name, delay, Reply::Panic)
    }

    /// How many times `fetch` has been entered. Shared between clones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn into_arc(self) -> Arc<dyn Provider> {
        Arc::new(self)
    }
}

#[async_trait]
impl Provider for StubProvider {
    async fn fetch(&self, code: &str) -> Result<Address, AdapterError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.reply {
            Reply::Found => Ok(Address {
                code: code.to_string(),
                street: "Rua Teste".into(),
                neighborhood: "Centro".into(),
                city: "São Paulo".into(),
                state: "SP".into(),
                source: self.name.clone(),
            }),
            Reply::Empty => Ok(Address {
                source: self.name.clone(),
                ..Default::default()
            }),
            Reply::NotFound => Err(AdapterError::NotFound),
            Reply::Http(message) => Err(AdapterError::Http(message.clone())),
            Reply::Panic => panic!("stub provider {} panicked", self.name),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
