//! Secret documents and Vault wire types.

use crate::error::{VaultError, VaultResult};
use secrecy::SecretString;
use serde::Deserialize;
use serde_json::{Map, Value};

const DATA_KEY: &str = "data";
const METADATA_KEY: &str = "metadata";

/// The `data` object of a KV v2 read: a nested `data` payload holding the
/// secret fields, next to the version `metadata`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct SecretDocument(Map<String, Value>);

impl SecretDocument {
    /// Wrap a raw document.
    #[must_use]
    pub const fn new(document: Map<String, Value>) -> Self {
        Self(document)
    }

    /// Project the string field `key` out of the nested data payload.
    ///
    /// # Errors
    ///
    /// - [`VaultError::MalformedDocument`] if there is no nested `data` object
    /// - [`VaultError::FieldNotFound`] if `key` is absent
    /// - [`VaultError::FieldNotString`] if the value under `key` is not a string
    pub fn field(&self, key: &str) -> VaultResult<SecretString> {
        let payload = match self.0.get(DATA_KEY) {
            Some(Value::Object(payload)) => payload,
            Some(_) => {
                return Err(VaultError::MalformedDocument(
                    "data payload is not an object".to_string(),
                ));
            }
            None => {
                return Err(VaultError::MalformedDocument(
                    "data payload missing".to_string(),
                ));
            }
        };

        match payload.get(key) {
            Some(Value::String(value)) => Ok(SecretString::from(value.clone())),
            Some(_) => Err(VaultError::FieldNotString { key: key.to_string() }),
            None => Err(VaultError::FieldNotFound { key: key.to_string() }),
        }
    }

    /// Secret version from the KV v2 metadata, if present.
    #[must_use]
    pub fn version(&self) -> Option<u64> {
        self.0
            .get(METADATA_KEY)?
            .get("version")?
            .as_u64()
    }
}

impl TryFrom<Value> for SecretDocument {
    type Error = VaultError;

    fn try_from(value: Value) -> VaultResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(VaultError::MalformedDocument(format!(
                "secret document is not an object: {other}"
            ))),
        }
    }
}

/// Vault KV v2 read response wrapper
#[derive(Debug, Deserialize)]
pub(crate) struct KvResponse {
    pub data: SecretDocument,
}

/// Vault auth response
#[derive(Debug, Deserialize)]
pub(crate) struct AuthResponse {
    pub auth: AuthData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuthData {
    pub client_token: String,
}

/// Vault error body, `{"errors": [...]}`
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub errors: Vec<String>,
}
