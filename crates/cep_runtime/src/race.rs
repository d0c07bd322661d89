//! Outcome bookkeeping for a single race.

use crate::error::{ProviderFailure, ResolveError};
use cep_adapter::{AdapterError, Address};
use std::time::Duration;
use tracing::debug;

/// What one provider reported. Produced once per invocation and consumed once.
#[derive(Debug)]
pub struct Outcome {
    pub provider: String,
    pub result: Result<Address, AdapterError>,
}

impl Outcome {
    pub fn new(provider: impl Into<String>, result: Result<Address, AdapterError>) -> Self {
        Self {
            provider: provider.into(),
            result,
        }
    }

    /// Only a non-empty address counts as success.
    pub fn into_result(self) -> Result<Address, ProviderFailure> {
        let error = match self.result {
            Ok(address) if !address.is_empty() => return Ok(address),
            Ok(_) => AdapterError::EmptyResponse,
            Err(e) => e,
        };
        Err(ProviderFailure {
            provider: self.provider,
            error,
        })
    }
}

/// Arrival-order tally. Keeps the first failure, never a later one.
#[derive(Debug)]
pub(crate) struct Race {
    expected: usize,
    received: usize,
    first_failure: Option<ProviderFailure>,
}

impl Race {
    pub(crate) fn new(expected: usize) -> Self {
        Self {
            expected,
            received: 0,
            first_failure: None,
        }
    }

    /// Record an outcome; returns the address when it is a winner.
    pub(crate) fn record(&mut self, outcome: Outcome) -> Option<Address> {
        self.received += 1;
        match outcome.into_result() {
            Ok(address) => Some(address),
            Err(failure) => {
                debug!(provider = %failure.provider, error = %failure.error, "provider failed");
                if self.first_failure.is_none() {
                    self.first_failure = Some(failure);
                }
                None
            }
        }
    }

    /// Every provider has reported.
    pub(crate) fn settled(&self) -> bool {
        self.received >= self.expected
    }

    pub(crate) fn all_failed(self) -> ResolveError {
        ResolveError::AllFailed {
            first: self.first_failure,
        }
    }

    pub(crate) fn timed_out(self, deadline: Duration) -> ResolveError {
        ResolveError::Timeout {
            deadline,
            first: self.first_failure,
        }
    }
}
