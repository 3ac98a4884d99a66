//! Vault error types using thiserror 2.0.
//!
//! Every failure is attributed to one [`Stage`] so callers can tell a bad
//! environment apart from a rejected login or a malformed secret document.

use thiserror::Error;

/// Stage of the component lifecycle an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Configuration validation.
    Config,
    /// HTTP client construction.
    Client,
    /// Login against the auth backends.
    Auth,
    /// KV read against the store.
    Read,
    /// Projection of a field out of the returned document.
    Data,
}

/// Vault-specific errors.
#[derive(Error, Debug)]
pub enum VaultError {
    /// A required configuration value is empty
    #[error("failed to validate Vault config, {field} is empty")]
    MissingConfig {
        /// Environment variable naming the missing value
        field: &'static str,
    },

    /// HTTP client could not be built
    #[error("failed to initialize Vault client: {0}")]
    ClientInit(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Every strategy of the default auth chain failed
    #[error("all Vault auth methods failed: iam: {iam}; approle: {app_role}")]
    AuthChainExhausted {
        /// Failure of the AWS IAM login
        iam: Box<VaultError>,
        /// Failure of the AppRole login
        app_role: Box<VaultError>,
    },

    /// AWS credentials could not be resolved for IAM login
    #[error("AWS credentials unavailable: {0}")]
    AwsCredentials(String),

    /// Vault server unavailable
    #[error("Vault unavailable: {0}")]
    Unavailable(String),

    /// Secret not found
    #[error("Secret not found at path: {0}")]
    SecretNotFound(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Rate limited
    #[error("Rate limited")]
    RateLimited,

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The KV document has no nested data payload
    #[error("Malformed secret document: {0}")]
    MalformedDocument(String),

    /// The requested field is absent from the secret
    #[error("field {key:?} not found in secret")]
    FieldNotFound {
        /// Requested field name
        key: String,
    },

    /// The requested field holds a non-string value
    #[error("field {key:?} in secret is not a string")]
    FieldNotString {
        /// Requested field name
        key: String,
    },
}

/// Result type for Vault operations.
pub type VaultResult<T> = Result<T, VaultError>;

impl VaultError {
    /// Check if error is retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Unavailable(_) | Self::RateLimited | Self::Http(_)
        )
    }

    /// Lifecycle stage this error belongs to.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        match self {
            Self::MissingConfig { .. } => Stage::Config,
            Self::ClientInit(_) => Stage::Client,
            Self::AuthenticationFailed(_)
            | Self::AuthChainExhausted { .. }
            | Self::AwsCredentials(_) => Stage::Auth,
            Self::MalformedDocument(_) | Self::FieldNotFound { .. } | Self::FieldNotString { .. } => {
                Stage::Data
            }
            Self::Unavailable(_)
            | Self::SecretNotFound(_)
            | Self::PermissionDenied(_)
            | Self::RateLimited
            | Self::Http(_)
            | Self::Serialization(_) => Stage::Read,
        }
    }

    /// Create an unavailable error.
    #[must_use]
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Create an authentication failed error.
    #[must_use]
    pub fn auth_failed(msg: impl Into<String>) -> Self {
        Self::AuthenticationFailed(msg.into())
    }

    /// Create a secret not found error.
    #[must_use]
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::SecretNotFound(path.into())
    }

    /// Create a client initialization error.
    #[must_use]
    pub fn client_init(msg: impl Into<String>) -> Self {
        Self::ClientInit(msg.into())
    }

    /// Create an AWS credentials error.
    #[must_use]
    pub fn aws_credentials(msg: impl Into<String>) -> Self {
        Self::AwsCredentials(msg.into())
    }
}
