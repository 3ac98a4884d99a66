//! Authentication strategies.
//!
//! The default chain tries AWS IAM login first, which succeeds wherever the
//! process runs with an AWS identity, then falls back to AppRole for local
//! runs. LDAP login is intentionally not offered so directory credentials
//! never have to be exposed outside managed environments.

use crate::{
    backend::{AppRoleLoginOptions, AuthToken, IamLoginOptions, VaultBackend},
    config::SpaceConfig,
    error::{VaultError, VaultResult},
};
use async_trait::async_trait;
use tracing::{debug, info};

/// Authenticates against a Vault backend, producing the session token.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Log in and return the resulting session.
    async fn authenticate(&self, backend: &dyn VaultBackend) -> VaultResult<AuthToken>;
}

/// AWS IAM login with fallback to AppRole login.
#[derive(Debug, Clone)]
pub struct DefaultChainAuth {
    iam: IamLoginOptions,
    app_role: AppRoleLoginOptions,
}

impl DefaultChainAuth {
    /// Build the chain from the config's IAM role, AppRole credentials and
    /// derived login paths.
    #[must_use]
    pub fn from_config(config: &SpaceConfig) -> Self {
        Self::new(config.iam_login_options(), config.app_role_login_options())
    }

    /// Build the chain from explicit login options.
    #[must_use]
    pub const fn new(iam: IamLoginOptions, app_role: AppRoleLoginOptions) -> Self {
        Self { iam, app_role }
    }
}

#[async_trait]
impl AuthProvider for DefaultChainAuth {
    async fn authenticate(&self, backend: &dyn VaultBackend) -> VaultResult<AuthToken> {
        let iam_err = match backend.iam_login(&self.iam).await {
            Ok(token) => {
                info!("Vault client authenticated with AWS IAM method");
                return Ok(token);
            }
            Err(e) => e,
        };
        debug!(error = %iam_err, "Vault AWS IAM auth failed");

        let app_role_err = match backend.app_role_login(&self.app_role).await {
            Ok(token) => {
                info!("Vault client authenticated with AppRole method");
                return Ok(token);
            }
            Err(e) => e,
        };
        debug!(error = %app_role_err, "Vault AppRole auth failed");

        Err(VaultError::AuthChainExhausted {
            iam: Box::new(iam_err),
            app_role: Box::new(app_role_err),
        })
    }
}

/// AWS IAM login only.
#[derive(Debug, Clone)]
pub struct IamAuth(pub IamLoginOptions);

#[async_trait]
impl AuthProvider for IamAuth {
    async fn authenticate(&self, backend: &dyn VaultBackend) -> VaultResult<AuthToken> {
        backend.iam_login(&self.0).await
    }
}

/// AppRole login only.
#[derive(Debug, Clone)]
pub struct AppRoleAuth(pub AppRoleLoginOptions);

#[async_trait]
impl AuthProvider for AppRoleAuth {
    async fn authenticate(&self, backend: &dyn VaultBackend) -> VaultResult<AuthToken> {
        backend.app_role_login(&self.0).await
    }
}
