//! AWS identity for the Vault IAM auth method.
//!
//! Vault verifies an IAM login by replaying a SigV4-signed
//! `sts:GetCallerIdentity` request built by the client, so the client needs
//! credentials for its ambient AWS identity and a signer.

mod credentials;
mod signing;

pub use aws_credential_types::Credentials as AwsCredentials;
pub use credentials::AwsCredentialsResolver;
pub use signing::{SignedStsRequest, sign_get_caller_identity};
