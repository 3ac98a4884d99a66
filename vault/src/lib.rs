//! HashiCorp Vault secret getter for team spaces.
//!
//! Resolves a [`SpaceConfig`] from the environment, authenticates once with
//! AWS IAM login (falling back to AppRole), then serves fields of a KV v2
//! secret through [`VaultComponent::get_secret`].
//!
//! ```no_run
//! use secrecy::ExposeSecret;
//! use space_vault::{ComponentOptions, SpaceConfig, VaultComponent};
//!
//! # async fn run() -> space_vault::VaultResult<()> {
//! let component = VaultComponent::new(
//!     SpaceConfig::from_env(),
//!     ComponentOptions::default().with_url("https://vault.example.com:8200"),
//! )
//! .await?;
//! let password = component.get_secret("password").await?;
//! # let _ = password.expose_secret();
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod aws;
pub mod backend;
pub mod client;
pub mod component;
pub mod config;
pub mod error;
pub mod options;
pub mod provider;
pub mod secrets;

pub use auth::{AppRoleAuth, AuthProvider, DefaultChainAuth, IamAuth};
pub use aws::AwsCredentials;
pub use backend::{AppRoleLoginOptions, AuthToken, IamLoginOptions, VaultBackend};
pub use client::HttpVaultClient;
pub use component::VaultComponent;
pub use config::SpaceConfig;
pub use error::{Stage, VaultError, VaultResult};
pub use options::{AuthStrategy, ComponentOptions};
pub use provider::SecretGetter;
pub use secrets::SecretDocument;
