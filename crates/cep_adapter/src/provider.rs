use crate::error::Result;
use crate::types::Address;
use async_trait::async_trait;

/// One backing lookup service.
///
/// `fetch` performs a single request bounded by the provider's own timeout
/// and never retries. Implementations hold only immutable configuration, so
/// one instance can serve concurrent lookups.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn fetch(&self, code: &str) -> Result<Address>;

    /// Stable identifier, copied into `Address::source`.
    fn name(&self) -> &str;
}
