//! Component construction options.

use crate::{
    auth::{AppRoleAuth, AuthProvider, DefaultChainAuth, IamAuth},
    backend::{AppRoleLoginOptions, IamLoginOptions},
    config::SpaceConfig,
};
use std::{fmt, sync::Arc, time::Duration};
use tracing::Dispatch;

/// Vault server URL used when none is configured.
pub const DEFAULT_URL: &str = "https://your.vault.server.url/";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How the component authenticates.
#[derive(Clone, Default)]
pub enum AuthStrategy {
    /// AWS IAM login, falling back to AppRole, using config-derived values.
    #[default]
    DefaultChain,
    /// AWS IAM login only, with explicit parameters.
    Iam(IamLoginOptions),
    /// AppRole login only, with explicit parameters.
    AppRole(AppRoleLoginOptions),
    /// Caller-supplied provider.
    Custom(Arc<dyn AuthProvider>),
}

impl AuthStrategy {
    /// Resolve the strategy into a provider.
    #[must_use]
    pub fn into_provider(self, config: &SpaceConfig) -> Arc<dyn AuthProvider> {
        match self {
            Self::DefaultChain => Arc::new(DefaultChainAuth::from_config(config)),
            Self::Iam(options) => Arc::new(IamAuth(options)),
            Self::AppRole(options) => Arc::new(AppRoleAuth(options)),
            Self::Custom(provider) => provider,
        }
    }
}

impl fmt::Debug for AuthStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DefaultChain => f.write_str("DefaultChain"),
            Self::Iam(options) => f.debug_tuple("Iam").field(options).finish(),
            Self::AppRole(options) => f.debug_tuple("AppRole").field(options).finish(),
            Self::Custom(_) => f.write_str("Custom"),
        }
    }
}

/// Options for [`crate::VaultComponent`].
///
/// | option   | default                          |
/// |----------|----------------------------------|
/// | logger   | the current `tracing` dispatcher |
/// | url      | [`DEFAULT_URL`]                  |
/// | timeout  | [`DEFAULT_TIMEOUT`]              |
/// | auth     | [`AuthStrategy::DefaultChain`]   |
#[derive(Debug, Clone)]
pub struct ComponentOptions {
    /// Log sink for component events
    pub logger: Option<Dispatch>,
    /// Vault server URL
    pub url: String,
    /// HTTP request timeout
    pub timeout: Duration,
    /// Authentication strategy
    pub auth: AuthStrategy,
}

impl Default for ComponentOptions {
    fn default() -> Self {
        Self {
            logger: None,
            url: DEFAULT_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            auth: AuthStrategy::DefaultChain,
        }
    }
}

impl ComponentOptions {
    /// Send component events to `logger` instead of the current dispatcher.
    #[must_use]
    pub fn with_logger(mut self, logger: impl Into<Dispatch>) -> Self {
        self.logger = Some(logger.into());
        self
    }

    /// Set the Vault server URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set the HTTP request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the authentication strategy.
    #[must_use]
    pub fn with_auth(mut self, auth: AuthStrategy) -> Self {
        self.auth = auth;
        self
    }

    /// Authenticate with a custom provider.
    #[must_use]
    pub fn with_auth_provider(self, provider: impl AuthProvider + 'static) -> Self {
        self.with_auth(AuthStrategy::Custom(Arc::new(provider)))
    }
}
