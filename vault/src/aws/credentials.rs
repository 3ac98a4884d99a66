use crate::error::{VaultError, VaultResult};
use aws_config::BehaviorVersion;
use aws_credential_types::{
    Credentials,
    provider::{ProvideCredentials, SharedCredentialsProvider},
};
use tracing::debug;

/// Resolves the ambient AWS identity.
///
/// By default this is the AWS SDK credential chain: environment keys, shared
/// profile, web identity token (EKS IRSA), ECS container endpoint and EC2
/// instance metadata, in the SDK's order.
#[derive(Debug, Clone, Default)]
pub struct AwsCredentialsResolver {
    provider: Option<SharedCredentialsProvider>,
}

impl AwsCredentialsResolver {
    /// Resolver using the AWS SDK default credential chain, loaded on first use.
    #[must_use]
    pub const fn default_chain() -> Self {
        Self { provider: None }
    }

    /// Resolver backed by a specific credentials provider.
    #[must_use]
    pub fn with_provider(provider: impl ProvideCredentials + 'static) -> Self {
        Self {
            provider: Some(SharedCredentialsProvider::new(provider)),
        }
    }

    /// Resolve credentials for the ambient identity.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::AwsCredentials`] if no source yields credentials.
    pub async fn resolve(&self) -> VaultResult<Credentials> {
        let provider = match &self.provider {
            Some(provider) => provider.clone(),
            None => load_default_chain().await?,
        };

        let credentials = provider
            .provide_credentials()
            .await
            .map_err(|e| VaultError::aws_credentials(error_chain(&e)))?;
        debug!(
            access_key_id = credentials.access_key_id(),
            "Resolved AWS credentials"
        );
        Ok(credentials)
    }
}

async fn load_default_chain() -> VaultResult<SharedCredentialsProvider> {
    aws_config::defaults(BehaviorVersion::latest())
        .load()
        .await
        .credentials_provider()
        .ok_or_else(|| VaultError::aws_credentials("no AWS credentials provider configured"))
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_config::meta::credentials::CredentialsProviderChain;
    use aws_credential_types::provider::{error::CredentialsError, future};

    #[derive(Debug)]
    struct Unavailable;

    impl ProvideCredentials for Unavailable {
        fn provide_credentials<'a>(&'a self) -> future::ProvideCredentials<'a>
        where
            Self: 'a,
        {
            future::ProvideCredentials::ready(Err(CredentialsError::not_loaded(
                "web identity token file not found",
            )))
        }
    }

    fn creds(access_key_id: &str) -> Credentials {
        Credentials::new(access_key_id, "secret", None, None, "test")
    }

    #[tokio::test]
    async fn test_first_source_in_chain_wins() {
        let chain = CredentialsProviderChain::first_try("web-identity", creds("PODKEY"))
            .or_else("instance-metadata", creds("NODEKEY"));
        let resolved = AwsCredentialsResolver::with_provider(chain).resolve().await.unwrap();
        assert_eq!(resolved.access_key_id(), "PODKEY");
    }

    #[tokio::test]
    async fn test_chain_skips_unavailable_source() {
        let chain = CredentialsProviderChain::first_try("web-identity", Unavailable)
            .or_else("profile", creds("PROFILEKEY"));
        let resolved = AwsCredentialsResolver::with_provider(chain).resolve().await.unwrap();
        assert_eq!(resolved.access_key_id(), "PROFILEKEY");
    }

    #[tokio::test]
    async fn test_provider_failure_is_credentials_error() {
        let err = AwsCredentialsResolver::with_provider(Unavailable)
            .resolve()
            .await
            .unwrap_err();
        assert!(matches!(err, VaultError::AwsCredentials(_)));
        assert!(err.to_string().contains("web identity token file not found"));
    }
}
