//! Store-agnostic secret retrieval trait.

use async_trait::async_trait;
use secrecy::SecretString;

/// Fetches named secrets from a secrets management store.
#[async_trait]
pub trait SecretGetter: Send + Sync {
    /// Error returned by the store.
    type Error: std::error::Error + Send + Sync;

    /// Fetch the secret stored under `key`.
    async fn get_secret(&self, key: &str) -> Result<SecretString, Self::Error>;
}
