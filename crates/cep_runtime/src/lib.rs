//! Race coordinator for postal-code lookups.
//!
//! [`Resolver`] fans one lookup out to every registered
//! [`Provider`](cep_adapter::Provider), returns the first well-formed address
//! that arrives, and bounds the whole call with a single deadline.

pub mod code;
pub mod engine;
pub mod error;
pub mod race;
#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use cep_adapter::Address;
pub use code::Code;
pub use engine::{Resolver, DEFAULT_DEADLINE};
pub use error::{ProviderFailure, ResolveError};
pub use race::Outcome;
