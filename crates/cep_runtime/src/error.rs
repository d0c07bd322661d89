use cep_adapter::AdapterError;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// An adapter failure tagged with the provider that produced it.
#[derive(Error, Debug)]
#[error("{provider}: {error}")]
pub struct ProviderFailure {
    pub provider: String,
    #[source]
    pub error: AdapterError,
}

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("all providers failed{}", Cause(.first))]
    AllFailed {
        #[source]
        first: Option<ProviderFailure>,
    },

    #[error("timeout: no provider answered within {}ms{}", .deadline.as_millis(), Cause(.first))]
    Timeout {
        deadline: Duration,
        #[source]
        first: Option<ProviderFailure>,
    },
}

impl ResolveError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// The first adapter failure seen during the race, if any.
    pub fn first_failure(&self) -> Option<&ProviderFailure> {
        match self {
            Self::InvalidInput(_) => None,
            Self::AllFailed { first } | Self::Timeout { first, .. } => first.as_ref(),
        }
    }
}

struct Cause<'a>(&'a Option<ProviderFailure>);

impl fmt::Display for Cause<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(failure) => write!(f, " (first: {failure})"),
            None => Ok(()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ResolveError>;
