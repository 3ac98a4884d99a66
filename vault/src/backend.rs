//! Capabilities the component needs from a Vault server.
//!
//! [`crate::HttpVaultClient`] implements these over HTTP; tests substitute
//! scripted backends.

use crate::{aws::AwsCredentials, error::VaultResult, secrets::SecretDocument};
use async_trait::async_trait;
use secrecy::SecretString;

/// An authenticated Vault session.
#[derive(Debug, Clone)]
pub struct AuthToken {
    /// Client token sent as `X-Vault-Token`
    pub client_token: SecretString,
}

impl AuthToken {
    /// Wrap a bare client token.
    #[must_use]
    pub fn new(client_token: impl Into<String>) -> Self {
        Self {
            client_token: SecretString::from(client_token.into()),
        }
    }
}

/// Parameters for the AWS IAM auth method.
/// <https://developer.hashicorp.com/vault/docs/auth/aws>
#[derive(Debug, Clone)]
pub struct IamLoginOptions {
    /// Vault AWS auth role (the IAM role ARN bound to it)
    pub role: String,
    /// Auth mount path, e.g. `MyTeamVaultSpace/aws`
    pub mount_path: String,
    /// STS region; `None` signs for the global endpoint in `us-east-1`
    pub region: Option<String>,
    /// Value for the `X-Vault-AWS-IAM-Server-ID` header, if the server requires one
    pub server_id_header: Option<String>,
    /// Explicit credentials; `None` uses the AWS SDK default credential chain
    pub credentials: Option<AwsCredentials>,
}

impl IamLoginOptions {
    /// Create IAM login options for `role` at `mount_path`.
    #[must_use]
    pub fn new(role: impl Into<String>, mount_path: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            mount_path: mount_path.into(),
            region: None,
            server_id_header: None,
            credentials: None,
        }
    }

    /// Sign against a regional STS endpoint.
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set the Vault server id header value.
    #[must_use]
    pub fn with_server_id_header(mut self, value: impl Into<String>) -> Self {
        self.server_id_header = Some(value.into());
        self
    }

    /// Use explicit AWS credentials instead of the ambient identity.
    #[must_use]
    pub fn with_credentials(mut self, credentials: AwsCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }
}

/// Parameters for the AppRole auth method.
/// <https://developer.hashicorp.com/vault/docs/auth/approle>
#[derive(Debug, Clone)]
pub struct AppRoleLoginOptions {
    /// Role id
    pub role_id: String,
    /// Secret id
    pub secret_id: SecretString,
    /// Auth mount path, e.g. `MyTeamVaultSpace/approle`
    pub mount_path: String,
}

impl AppRoleLoginOptions {
    /// Create AppRole login options.
    #[must_use]
    pub fn new(
        role_id: impl Into<String>,
        secret_id: impl Into<String>,
        mount_path: impl Into<String>,
    ) -> Self {
        Self {
            role_id: role_id.into(),
            secret_id: SecretString::from(secret_id.into()),
            mount_path: mount_path.into(),
        }
    }
}

/// Login and KV v2 read operations against a Vault server.
#[async_trait]
pub trait VaultBackend: Send + Sync {
    /// Log in with the AWS IAM method.
    async fn iam_login(&self, options: &IamLoginOptions) -> VaultResult<AuthToken>;

    /// Log in with the AppRole method.
    async fn app_role_login(&self, options: &AppRoleLoginOptions) -> VaultResult<AuthToken>;

    /// Read the latest version of the KV v2 secret at `mount_path`/`secret_path`.
    async fn kv2_get(
        &self,
        token: &AuthToken,
        mount_path: &str,
        secret_path: &str,
    ) -> VaultResult<SecretDocument>;
}
