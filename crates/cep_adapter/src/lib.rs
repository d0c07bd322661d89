//! CEP lookup adapters.
//!
//! Each adapter wraps one third-party postal-code service behind the
//! [`Provider`] trait and maps its response shape onto [`Address`].
//!
//! ```text
//! Resolver (cep_runtime)
//!   │  fetch(code)            one task per provider
//!   ├──────────────► BrasilApi ──GET {base}/{code}──────────► brasilapi.com.br
//!   └──────────────► ViaCep    ──GET {base}/{code}/json/────► viacep.com.br
//! ```
//!
//! "Not found" classification and field mapping stay inside each adapter;
//! callers only see `Result<Address, AdapterError>`.

pub mod brasil_api;
pub mod error;
pub mod http;
pub mod provider;
pub mod types;
pub mod via_cep;

pub use brasil_api::BrasilApi;
pub use error::AdapterError;
pub use provider::Provider;
pub use types::Address;
pub use via_cep::ViaCep;
