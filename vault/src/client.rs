//! Vault HTTP client for the AWS IAM / AppRole login endpoints and KV v2 reads.

use crate::{
    aws::{AwsCredentialsResolver, sign_get_caller_identity},
    backend::{AppRoleLoginOptions, AuthToken, IamLoginOptions, VaultBackend},
    error::{VaultError, VaultResult},
    secrets::{AuthResponse, ErrorResponse, KvResponse, SecretDocument},
};
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::{Client, Response, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use std::time::{Duration, SystemTime};
use tracing::{debug, instrument};
use url::Url;

const TOKEN_HEADER: &str = "X-Vault-Token";

/// Vault client speaking the HTTP API directly.
#[derive(Debug, Clone)]
pub struct HttpVaultClient {
    base: Url,
    http: Client,
    aws: AwsCredentialsResolver,
}

impl HttpVaultClient {
    /// Create a client for the Vault server at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::ClientInit`] if `addr` is not an absolute
    /// http(s) URL or the HTTP client cannot be built.
    pub fn new(addr: &str, timeout: Duration) -> VaultResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| VaultError::client_init(e.to_string()))?;
        Self::with_parts(addr, http, AwsCredentialsResolver::default_chain())
    }

    /// Create a client from a prebuilt HTTP client and AWS credential resolver.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::ClientInit`] if `addr` is not an absolute http(s) URL.
    pub fn with_parts(addr: &str, http: Client, aws: AwsCredentialsResolver) -> VaultResult<Self> {
        let mut base =
            Url::parse(addr).map_err(|e| VaultError::client_init(format!("invalid Vault URL {addr:?}: {e}")))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(VaultError::client_init(format!(
                "unsupported Vault URL scheme {:?}",
                base.scheme()
            )));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { base, http, aws })
    }

    /// Vault server base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base
    }

    /// `v1/` URL for `parts`. Each part is split on `/` and every piece is
    /// percent-encoded as a single path segment.
    fn endpoint<'a>(&self, parts: impl IntoIterator<Item = &'a str>) -> VaultResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| VaultError::client_init(format!("Vault URL {} cannot carry a path", self.base)))?
            .pop_if_empty()
            .push("v1")
            .extend(
                parts
                    .into_iter()
                    .flat_map(|part| part.split('/'))
                    .filter(|segment| !segment.is_empty()),
            );
        Ok(url)
    }

    async fn login(&self, mount_path: &str, body: serde_json::Value) -> VaultResult<AuthToken> {
        let url = self.endpoint(["auth", mount_path, "login"])?;
        let response = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| VaultError::unavailable(e.to_string()))?;

        let status = response.status();
        if matches!(
            status,
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            let detail = error_detail(response).await;
            return Err(VaultError::auth_failed(format!("Status {status}: {detail}")));
        }

        let auth: AuthResponse = parse(mount_path, response).await?;
        debug!(mount_path, "Vault login succeeded");
        Ok(AuthToken::new(auth.auth.client_token))
    }
}

#[async_trait]
impl VaultBackend for HttpVaultClient {
    #[instrument(skip(self, options), fields(mount_path = %options.mount_path, role = %options.role))]
    async fn iam_login(&self, options: &IamLoginOptions) -> VaultResult<AuthToken> {
        let credentials = match &options.credentials {
            Some(credentials) => credentials.clone(),
            None => self.aws.resolve().await?,
        };

        let signed = sign_get_caller_identity(
            &credentials,
            options.region.as_deref(),
            options.server_id_header.as_deref(),
            SystemTime::now(),
        )?;
        let headers = serde_json::to_vec(&signed.headers)?;

        let body = serde_json::json!({
            "role": options.role,
            "iam_http_request_method": signed.method,
            "iam_request_url": STANDARD.encode(signed.url.as_bytes()),
            "iam_request_body": STANDARD.encode(signed.body.as_bytes()),
            "iam_request_headers": STANDARD.encode(headers),
        });
        self.login(&options.mount_path, body).await
    }

    #[instrument(skip(self, options), fields(mount_path = %options.mount_path))]
    async fn app_role_login(&self, options: &AppRoleLoginOptions) -> VaultResult<AuthToken> {
        let body = serde_json::json!({
            "role_id": options.role_id,
            "secret_id": options.secret_id.expose_secret(),
        });
        self.login(&options.mount_path, body).await
    }

    #[instrument(skip(self, token))]
    async fn kv2_get(
        &self,
        token: &AuthToken,
        mount_path: &str,
        secret_path: &str,
    ) -> VaultResult<SecretDocument> {
        let path = format!("{mount_path}/data/{secret_path}");
        let url = self.endpoint([mount_path, "data", secret_path])?;

        let response = self
            .http
            .get(url)
            .header(TOKEN_HEADER, token.client_token.expose_secret())
            .send()
            .await
            .map_err(|e| VaultError::unavailable(e.to_string()))?;

        let kv: KvResponse = parse(&path, response).await?;
        debug!(path, version = ?kv.data.version(), "Read secret");
        Ok(kv.data)
    }
}

async fn parse<T: DeserializeOwned>(path: &str, response: Response) -> VaultResult<T> {
    let status = response.status();
    match status.as_u16() {
        404 => return Err(VaultError::not_found(path)),
        403 => return Err(VaultError::PermissionDenied(path.to_string())),
        429 => return Err(VaultError::RateLimited),
        _ if !status.is_success() => {
            let detail = error_detail(response).await;
            return Err(VaultError::unavailable(format!("Status {status}: {detail}")));
        }
        _ => {}
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(VaultError::from)
}

async fn error_detail(response: Response) -> String {
    let text = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorResponse>(&text) {
        Ok(body) if !body.errors.is_empty() => body.errors.join("; "),
        _ => text,
    }
}
