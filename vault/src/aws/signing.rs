use crate::error::{VaultError, VaultResult};
use aws_credential_types::Credentials;
use aws_sigv4::{
    http_request::{SignableBody, SignableRequest, SigningSettings, sign},
    sign::v4,
};
use aws_smithy_runtime_api::client::identity::Identity;
use std::{collections::BTreeMap, time::SystemTime};

const SERVICE: &str = "sts";
const DEFAULT_REGION: &str = "us-east-1";
const GLOBAL_HOST: &str = "sts.amazonaws.com";
const BODY: &str = "Action=GetCallerIdentity&Version=2011-06-15";
const CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";
const SERVER_ID_HEADER: &str = "x-vault-aws-iam-server-id";

/// A signed `sts:GetCallerIdentity` request, ready to be embedded in a
/// Vault IAM login payload.
#[derive(Debug, Clone)]
pub struct SignedStsRequest {
    /// HTTP method
    pub method: &'static str,
    /// Request URL
    pub url: String,
    /// Canonical-case header names mapped to their values
    pub headers: BTreeMap<String, Vec<String>>,
    /// Form-encoded request body
    pub body: String,
}

/// Sign `sts:GetCallerIdentity` with SigV4.
///
/// `region` selects the regional STS endpoint; `None` uses the global
/// endpoint signed for `us-east-1`. `server_id` is added as the signed
/// `X-Vault-AWS-IAM-Server-ID` header.
///
/// # Errors
///
/// Returns [`VaultError::AwsCredentials`] if the request cannot be signed.
pub fn sign_get_caller_identity(
    credentials: &Credentials,
    region: Option<&str>,
    server_id: Option<&str>,
    time: SystemTime,
) -> VaultResult<SignedStsRequest> {
    let (host, signing_region) = match region {
        Some(region) => (format!("sts.{region}.amazonaws.com"), region),
        None => (GLOBAL_HOST.to_string(), DEFAULT_REGION),
    };
    let url = format!("https://{host}/");

    let mut headers = vec![("content-type", CONTENT_TYPE), ("host", host.as_str())];
    if let Some(server_id) = server_id {
        headers.push((SERVER_ID_HEADER, server_id));
    }

    let identity = Identity::from(credentials.clone());
    let params = v4::SigningParams::builder()
        .identity(&identity)
        .region(signing_region)
        .name(SERVICE)
        .time(time)
        .settings(SigningSettings::default())
        .build()
        .map_err(signing_error)?
        .into();
    let request = SignableRequest::new(
        "POST",
        url.as_str(),
        headers.iter().copied(),
        SignableBody::Bytes(BODY.as_bytes()),
    )
    .map_err(signing_error)?;
    let (instructions, _signature) = sign(request, &params).map_err(signing_error)?.into_parts();

    let mut signed: BTreeMap<String, Vec<String>> = headers
        .iter()
        .map(|(name, value)| (canonical_header_name(name), vec![(*value).to_string()]))
        .collect();
    for (name, value) in instructions.headers() {
        signed.insert(canonical_header_name(name), vec![value.to_string()]);
    }

    Ok(SignedStsRequest {
        method: "POST",
        url,
        headers: signed,
        body: BODY.to_string(),
    })
}

fn signing_error(e: impl std::fmt::Display) -> VaultError {
    VaultError::aws_credentials(format!("signing sts:GetCallerIdentity: {e}"))
}

/// `x-amz-security-token` -> `X-Amz-Security-Token`, the form Vault's
/// header lookups expect.
fn canonical_header_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
            })
        })
        .collect::<Vec<_>>()
        .join("-")
}
