//! Vault-backed secret getter.

use crate::{
    backend::{AuthToken, VaultBackend},
    client::HttpVaultClient,
    config::SpaceConfig,
    error::{VaultError, VaultResult},
    options::ComponentOptions,
    provider::SecretGetter,
};
use async_trait::async_trait;
use secrecy::SecretString;
use std::{future::Future, sync::Arc};
use tracing::{Dispatch, debug, instrument::WithSubscriber};

/// Reads fields of one KV v2 secret through an authenticated Vault session.
///
/// Authentication happens once, in the constructor; every
/// [`get_secret`](Self::get_secret) call issues a fresh read with that
/// session and nothing is cached.
pub struct VaultComponent {
    config: SpaceConfig,
    backend: Arc<dyn VaultBackend>,
    token: AuthToken,
    logger: Option<Dispatch>,
}

impl VaultComponent {
    /// Validate `config`, connect to the Vault server named in `options`
    /// and authenticate.
    ///
    /// # Errors
    ///
    /// - [`VaultError::MissingConfig`] if the config is incomplete
    /// - [`VaultError::ClientInit`] if the HTTP client cannot be built
    /// - the auth strategy's error if login fails
    pub async fn new(config: SpaceConfig, options: ComponentOptions) -> VaultResult<Self> {
        config.validate()?;
        let client = HttpVaultClient::new(&options.url, options.timeout)?;
        Self::with_backend(config, options, Arc::new(client)).await
    }

    /// Like [`VaultComponent::new`], but over a caller-supplied backend.
    /// `options.url` and `options.timeout` are ignored.
    ///
    /// # Errors
    ///
    /// - [`VaultError::MissingConfig`] if the config is incomplete
    /// - the auth strategy's error if login fails
    pub async fn with_backend(
        config: SpaceConfig,
        options: ComponentOptions,
        backend: Arc<dyn VaultBackend>,
    ) -> VaultResult<Self> {
        config.validate()?;

        let ComponentOptions { logger, auth, .. } = options;
        let provider = auth.into_provider(&config);
        let token = in_logger_scope(logger.as_ref(), provider.authenticate(backend.as_ref())).await?;

        Ok(Self {
            config,
            backend,
            token,
            logger,
        })
    }

    /// Fetch the string field `key` of the configured secret.
    ///
    /// # Errors
    ///
    /// - store and transport errors from the read, unchanged
    /// - [`VaultError::MalformedDocument`] if the secret has no data payload
    /// - [`VaultError::FieldNotFound`] / [`VaultError::FieldNotString`] if
    ///   `key` is absent or not a string
    pub async fn get_secret(&self, key: &str) -> VaultResult<SecretString> {
        in_logger_scope(self.logger.as_ref(), async {
            debug!(
                mount_path = self.config.secret_mount_path(),
                secret_path = self.config.secret_path(),
                key,
                "Fetching secret field"
            );
            let document = self
                .backend
                .kv2_get(
                    &self.token,
                    self.config.secret_mount_path(),
                    self.config.secret_path(),
                )
                .await?;
            document.field(key)
        })
        .await
    }

    /// Configuration the component was built with.
    #[must_use]
    pub const fn config(&self) -> &SpaceConfig {
        &self.config
    }
}

impl std::fmt::Debug for VaultComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultComponent")
            .field("config", &self.config)
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl SecretGetter for VaultComponent {
    type Error = VaultError;

    async fn get_secret(&self, key: &str) -> VaultResult<SecretString> {
        Self::get_secret(self, key).await
    }
}

async fn in_logger_scope<F: Future>(logger: Option<&Dispatch>, fut: F) -> F::Output {
    match logger {
        Some(dispatch) => fut.with_subscriber(dispatch.clone()).await,
        None => fut.await,
    }
}
