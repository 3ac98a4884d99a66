//! HTTP client tests against a mock Vault server.

use aws_config::meta::credentials::CredentialsProviderChain;
use aws_credential_types::provider::{ProvideCredentials, error::CredentialsError, future};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::Client;
use secrecy::ExposeSecret;
use serde_json::{Value, json};
use space_vault::{
    AppRoleLoginOptions, AuthToken, AwsCredentials, HttpVaultClient, IamLoginOptions, VaultBackend,
    VaultError, aws::AwsCredentialsResolver,
};
use std::collections::HashMap;
use test_utils::fixtures;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, body_partial_json, header, method, path},
};

fn static_keys(access_key_id: &str, session_token: Option<&str>) -> AwsCredentials {
    AwsCredentials::new(access_key_id, "secret", session_token.map(str::to_string), None, "test")
}

fn client(server: &MockServer) -> HttpVaultClient {
    client_with(server, AwsCredentialsResolver::with_provider(static_keys("AKIDEXAMPLE", None)))
}

fn client_with(server: &MockServer, aws: AwsCredentialsResolver) -> HttpVaultClient {
    HttpVaultClient::with_parts(&server.uri(), Client::new(), aws).unwrap()
}

/// Provider with no credentials to offer.
#[derive(Debug)]
struct NoIdentity;

impl ProvideCredentials for NoIdentity {
    fn provide_credentials<'a>(&'a self) -> future::ProvideCredentials<'a>
    where
        Self: 'a,
    {
        future::ProvideCredentials::ready(Err(CredentialsError::not_loaded("no providers in chain")))
    }
}

fn decode_field(body: &Value, field: &str) -> Vec<u8> {
    STANDARD.decode(body[field].as_str().unwrap()).unwrap()
}

#[tokio::test]
async fn app_role_login_posts_credentials_to_space_mount() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/auth/TeamSpace/approle/login"))
        .and(body_json(json!({ "role_id": "role-id", "secret_id": "secret-id" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::auth_response("hvs.approle")))
        .expect(1)
        .mount(&server)
        .await;

    let token = client(&server)
        .app_role_login(&AppRoleLoginOptions::new("role-id", "secret-id", "TeamSpace/approle"))
        .await
        .unwrap();

    assert_eq!(token.client_token.expose_secret(), "hvs.approle");
}

#[tokio::test]
async fn rejected_login_is_authentication_failure_with_server_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/auth/TeamSpace/approle/login"))
        .respond_with(ResponseTemplate::new(400).set_body_json(fixtures::error_response(&["invalid role or secret ID"])))
        .mount(&server)
        .await;

    let err = client(&server)
        .app_role_login(&AppRoleLoginOptions::new("bad", "bad", "TeamSpace/approle"))
        .await
        .unwrap_err();

    assert!(matches!(err, VaultError::AuthenticationFailed(_)));
    assert!(err.to_string().contains("invalid role or secret ID"));
}

#[tokio::test]
async fn iam_login_sends_signed_caller_identity_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/auth/TeamSpace/aws/login"))
        .and(body_partial_json(json!({
            "role": "arn:aws:iam::123456789012:role/app",
            "iam_http_request_method": "POST"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::auth_response("hvs.iam")))
        .expect(1)
        .mount(&server)
        .await;

    let options = IamLoginOptions::new("arn:aws:iam::123456789012:role/app", "TeamSpace/aws")
        .with_server_id_header("vault.example.com")
        .with_credentials(static_keys("AKIDEXAMPLE", Some("session")));
    let token = client(&server).iam_login(&options).await.unwrap();
    assert_eq!(token.client_token.expose_secret(), "hvs.iam");

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();

    assert_eq!(decode_field(&body, "iam_request_url"), b"https://sts.amazonaws.com/");
    assert_eq!(
        decode_field(&body, "iam_request_body"),
        b"Action=GetCallerIdentity&Version=2011-06-15"
    );

    let headers: HashMap<String, Vec<String>> =
        serde_json::from_slice(&decode_field(&body, "iam_request_headers")).unwrap();
    assert_eq!(headers["X-Vault-Aws-Iam-Server-Id"], vec!["vault.example.com"]);
    assert_eq!(headers["X-Amz-Security-Token"], vec!["session"]);
    assert!(headers["Authorization"][0].starts_with("AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/"));
    assert!(!String::from_utf8_lossy(&requests[0].body).contains("\"secret\""));
}

#[tokio::test]
async fn iam_login_signs_with_first_identity_in_chain() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/auth/TeamSpace/aws/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::auth_response("hvs.iam")))
        .mount(&server)
        .await;

    let chain = CredentialsProviderChain::first_try("web-identity", static_keys("ASIAPODROLE", Some("pod")))
        .or_else("instance-metadata", static_keys("ASIANODEROLE", Some("node")));
    client_with(&server, AwsCredentialsResolver::with_provider(chain))
        .iam_login(&IamLoginOptions::new("role", "TeamSpace/aws"))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let headers: HashMap<String, Vec<String>> =
        serde_json::from_slice(&decode_field(&body, "iam_request_headers")).unwrap();
    assert!(headers["Authorization"][0].contains("Credential=ASIAPODROLE/"));
    assert_eq!(headers["X-Amz-Security-Token"], vec!["pod"]);
}

#[tokio::test]
async fn iam_login_without_credentials_never_reaches_vault() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::auth_response("unused")))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_with(&server, AwsCredentialsResolver::with_provider(NoIdentity))
        .iam_login(&IamLoginOptions::new("role", "TeamSpace/aws"))
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::AwsCredentials(_)));
}

#[tokio::test]
async fn kv2_get_reads_data_path_with_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/TeamSpace/secrets/data/mysecret-dev"))
        .and(header("X-Vault-Token", "hvs.session"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(fixtures::kv2_response(json!({ "password": "s3cr3t" }), 4)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let document = client(&server)
        .kv2_get(&AuthToken::new("hvs.session"), "TeamSpace/secrets", "mysecret-dev")
        .await
        .unwrap();

    assert_eq!(document.version(), Some(4));
    assert_eq!(document.field("password").unwrap().expose_secret(), "s3cr3t");
}

#[tokio::test]
async fn kv2_get_maps_error_statuses() {
    let server = MockServer::start().await;
    for (secret, status) in [("gone", 404_u16), ("forbidden", 403), ("busy", 429), ("broken", 503)] {
        Mock::given(method("GET"))
            .and(path(format!("/v1/TeamSpace/secrets/data/{secret}")))
            .respond_with(ResponseTemplate::new(status).set_body_json(fixtures::error_response(&["nope"])))
            .mount(&server)
            .await;
    }

    let client = client(&server);
    let token = AuthToken::new("hvs.session");
    let read = |secret: &'static str| {
        let client = client.clone();
        let token = token.clone();
        async move { client.kv2_get(&token, "TeamSpace/secrets", secret).await.unwrap_err() }
    };

    assert!(matches!(read("gone").await, VaultError::SecretNotFound(_)));
    assert!(matches!(read("forbidden").await, VaultError::PermissionDenied(_)));
    assert!(matches!(read("busy").await, VaultError::RateLimited));
    let err = read("broken").await;
    assert!(matches!(err, VaultError::Unavailable(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn kv2_get_never_truncates_path_at_reserved_characters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/TeamSpace/secrets/data/app"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::kv2_string_fields(&[("password", "OTHER")])))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/TeamSpace/secrets/data/app%23prod"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::kv2_string_fields(&[("password", "PROD")])))
        .expect(1)
        .mount(&server)
        .await;

    let document = client(&server)
        .kv2_get(&AuthToken::new("hvs.session"), "TeamSpace/secrets", "app#prod")
        .await
        .unwrap();

    assert_eq!(document.field("password").unwrap().expose_secret(), "PROD");
}
