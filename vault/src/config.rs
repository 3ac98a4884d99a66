//! Space configuration resolved from the process environment.

use crate::{
    backend::{AppRoleLoginOptions, IamLoginOptions},
    error::{VaultError, VaultResult},
};
use secrecy::SecretString;

/// Vault space name, e.g. `MyTeamVaultSpace`.
pub const ENV_SPACE_NAME: &str = "SPACE_NAME";
/// Secret path inside the space mount, e.g. `mysecret-dev`.
pub const ENV_SECRET_PATH: &str = "SECRET_PATH";
/// AWS IAM role ARN bound to the Vault AWS auth role.
pub const ENV_IAM_ROLE_ARN: &str = "IAM_ROLE_ARN";
/// AppRole role id.
pub const ENV_APP_ROLE_ID: &str = "APP_ROLE_ID";
/// AppRole secret id.
pub const ENV_APP_ROLE_SECRET_ID: &str = "APP_ROLE_SECRET_ID";

const SECRETS_MOUNT_SUFFIX: &str = "secrets";
const AWS_LOGIN_SUFFIX: &str = "aws";
const APP_ROLE_LOGIN_SUFFIX: &str = "approle";

/// Configuration for one Vault space.
///
/// The mount and login paths are derived from the space name when the
/// config is built and cannot be changed afterwards.
#[derive(Debug, Clone)]
pub struct SpaceConfig {
    space_name: String,
    secret_path: String,
    secret_mount_path: String,
    aws_login_path: String,
    app_role_login_path: String,
    aws_iam_role_arn: String,
    app_role_id: String,
    app_role_secret_id: SecretString,
}

impl SpaceConfig {
    /// Create a configuration for `space_name` reading `secret_path`.
    #[must_use]
    pub fn new(space_name: impl Into<String>, secret_path: impl Into<String>) -> Self {
        let space_name = space_name.into();
        Self {
            secret_mount_path: space_path(&space_name, SECRETS_MOUNT_SUFFIX),
            aws_login_path: space_path(&space_name, AWS_LOGIN_SUFFIX),
            app_role_login_path: space_path(&space_name, APP_ROLE_LOGIN_SUFFIX),
            space_name,
            secret_path: secret_path.into(),
            aws_iam_role_arn: String::new(),
            app_role_id: String::new(),
            app_role_secret_id: SecretString::from(String::new()),
        }
    }

    /// Resolve the configuration from the process environment.
    ///
    /// Unset or non-unicode variables resolve to an empty string; call
    /// [`SpaceConfig::validate`] to reject incomplete configurations.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve the configuration through an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).unwrap_or_default();
        Self::new(var(ENV_SPACE_NAME), var(ENV_SECRET_PATH))
            .with_iam_role_arn(var(ENV_IAM_ROLE_ARN))
            .with_app_role(var(ENV_APP_ROLE_ID), var(ENV_APP_ROLE_SECRET_ID))
    }

    /// Set the IAM role ARN used for AWS auth.
    #[must_use]
    pub fn with_iam_role_arn(mut self, arn: impl Into<String>) -> Self {
        self.aws_iam_role_arn = arn.into();
        self
    }

    /// Set the AppRole credentials.
    #[must_use]
    pub fn with_app_role(mut self, role_id: impl Into<String>, secret_id: impl Into<String>) -> Self {
        self.app_role_id = role_id.into();
        self.app_role_secret_id = SecretString::from(secret_id.into());
        self
    }

    /// Check that all required values are set.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::MissingConfig`] naming the first empty value,
    /// checking the space name before the secret path.
    pub fn validate(&self) -> VaultResult<()> {
        if self.space_name.is_empty() {
            return Err(VaultError::MissingConfig { field: ENV_SPACE_NAME });
        }
        if self.secret_path.is_empty() {
            return Err(VaultError::MissingConfig { field: ENV_SECRET_PATH });
        }
        Ok(())
    }

    /// Space name.
    #[must_use]
    pub fn space_name(&self) -> &str {
        &self.space_name
    }

    /// Secret path inside the secrets mount.
    #[must_use]
    pub fn secret_path(&self) -> &str {
        &self.secret_path
    }

    /// KV v2 mount path, `{space}/secrets`.
    #[must_use]
    pub fn secret_mount_path(&self) -> &str {
        &self.secret_mount_path
    }

    /// AWS auth mount path, `{space}/aws`.
    #[must_use]
    pub fn aws_login_path(&self) -> &str {
        &self.aws_login_path
    }

    /// AppRole auth mount path, `{space}/approle`.
    #[must_use]
    pub fn app_role_login_path(&self) -> &str {
        &self.app_role_login_path
    }

    /// IAM role ARN for AWS auth.
    #[must_use]
    pub fn aws_iam_role_arn(&self) -> &str {
        &self.aws_iam_role_arn
    }

    /// AppRole role id.
    #[must_use]
    pub fn app_role_id(&self) -> &str {
        &self.app_role_id
    }

    /// Login options for the AWS IAM method.
    #[must_use]
    pub fn iam_login_options(&self) -> IamLoginOptions {
        IamLoginOptions::new(&self.aws_iam_role_arn, &self.aws_login_path)
    }

    /// Login options for the AppRole method.
    #[must_use]
    pub fn app_role_login_options(&self) -> AppRoleLoginOptions {
        AppRoleLoginOptions {
            role_id: self.app_role_id.clone(),
            secret_id: self.app_role_secret_id.clone(),
            mount_path: self.app_role_login_path.clone(),
        }
    }
}

fn space_path(space_name: &str, suffix: &str) -> String {
    format!("{space_name}/{suffix}")
}
