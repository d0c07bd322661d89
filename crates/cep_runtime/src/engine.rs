//! First-success-wins race across every registered provider.
//!
//! ```text
//! resolve(code)
//!   ├─ spawn fetch(code) ──► provider 0 ─┐
//!   ├─ spawn fetch(code) ──► provider 1 ─┤  send(Outcome), at most once each
//!   └─ spawn fetch(code) ──► provider N ─┘
//!                                         ▼
//!              mpsc::channel(N) ──► select! { recv, sleep_until(deadline) }
//! ```
//!
//! The channel holds one slot per provider, so a task never waits to deliver.
//! Once the race is decided the receiver is dropped and late sends fail
//! immediately. Tasks are never aborted; their output is simply ignored.

use crate::error::{ResolveError, Result};
use crate::race::{Outcome, Race};
use cep_adapter::{AdapterError, Address, BrasilApi, Provider, ViaCep};
use cep_config::Settings;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, Instant};
use tracing::{debug, info, warn};

pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(1);

/// Stand-in expiry for deadlines too large to add to the clock (about 30 years).
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

#[derive(Clone)]
pub struct Resolver {
    providers: Vec<Arc<dyn Provider>>,
    deadline: Duration,
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("providers", &self.providers())
            .field("deadline", &self.deadline)
            .finish()
    }
}

impl Resolver {
    pub fn new(providers: Vec<Arc<dyn Provider>>) -> Self {
        Self {
            providers,
            deadline: DEFAULT_DEADLINE,
        }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// BrasilAPI and ViaCEP, configured from `settings`.
    pub fn from_settings(settings: &Settings) -> std::result::Result<Self, AdapterError> {
        let providers: Vec<Arc<dyn Provider>> = vec![
            Arc::new(BrasilApi::new(&settings.brasil_api_url, settings.http_timeout)?),
            Arc::new(ViaCep::new(&settings.viacep_url, settings.http_timeout)?),
        ];
        Ok(Self::new(providers).with_deadline(settings.deadline))
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Provider identifiers in registration order.
    pub fn providers(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Resolve `code` within the configured deadline.
    pub async fn resolve(&self, code: &str) -> Result<Address> {
        self.resolve_within(code, self.deadline).await
    }

    /// Resolve `code`, giving up after `deadline`.
    ///
    /// Returns the first non-empty address delivered by any provider. When
    /// every provider fails the error wraps the first failure observed; when
    /// the deadline passes first it wraps that failure if one had arrived.
    pub async fn resolve_within(&self, code: &str, deadline: Duration) -> Result<Address> {
        if code.is_empty() {
            return Err(ResolveError::InvalidInput("code must not be empty".into()));
        }

        let started = Instant::now();
        let expected = self.providers.len();
        let mut race = Race::new(expected);
        if expected == 0 {
            warn!(code, "no providers registered");
            return Err(race.all_failed());
        }

        let (tx, mut rx) = mpsc::channel::<Outcome>(expected);
        for provider in &self.providers {
            let provider = Arc::clone(provider);
            let tx = tx.clone();
            let code = code.to_string();
            debug!(provider = provider.name(), code = %code, "launching lookup");
            tokio::spawn(async move {
                let result = provider.fetch(&code).await;
                let outcome = Outcome::new(provider.name(), result);
                if tx.send(outcome).await.is_err() {
                    debug!(provider = provider.name(), "race already decided, outcome discarded");
                }
            });
        }
        // Only the tasks hold senders now; recv yields None once all are gone.
        drop(tx);

        let expires_at = started
            .checked_add(deadline)
            .unwrap_or_else(|| started + FAR_FUTURE);
        let expiry = time::sleep_until(expires_at);
        tokio::pin!(expiry);

        loop {
            tokio::select! {
                received = rx.recv() => {
                    let Some(outcome) = received else {
                        warn!(code, "providers stopped without reporting");
                        return Err(race.all_failed());
                    };
                    if let Some(address) = race.record(outcome) {
                        info!(
                            code,
                            source = %address.source,
                            elapsed_ms = started.elapsed().as_millis() as u64,
                            "resolved"
                        );
                        return Ok(address);
                    }
                    if race.settled() {
                        warn!(code, "all providers failed");
                        return Err(race.all_failed());
                    }
                }
                () = &mut expiry => {
                    warn!(code, deadline_ms = deadline.as_millis() as u64, "deadline exceeded");
                    return Err(race.timed_out(deadline));
                }
            }
        }
    }
}
