//! API response shapes
//!
//! The backend is not uniform: list endpoints answer with either a bare array
//! or `{ "data": [...] }`, detail endpoints with `{ "data": {...} }`, and
//! errors with some mix of `message` / `error` / `errors`.

use serde::{Deserialize, Serialize};

use crate::models::Identity;

/// List response in either of the two shapes the backend uses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Wrapped { data: Vec<T> },
    Bare(Vec<T>),
}

impl<T> ListEnvelope<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

/// Detail response, `{ "data": {...} }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Body of a successful create / update / delete
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MutationResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// Error body as returned by the backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    /// Field → messages, for server-side validation failures
    #[serde(default)]
    pub errors: Option<std::collections::BTreeMap<String, Vec<String>>>,
}

impl ErrorBody {
    /// Message to show verbatim, if the server sent one
    pub fn best_message(&self) -> Option<String> {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .or_else(|| {
                self.errors
                    .as_ref()
                    .and_then(|errors| errors.values().flatten().next().cloned())
            })
    }
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "access_token")]
    pub token: String,
    pub user: Identity,
}

/// Login response in either the bare or the `data`-wrapped form
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LoginEnvelope {
    Wrapped { data: LoginResponse },
    Bare(LoginResponse),
}

impl LoginEnvelope {
    pub fn into_inner(self) -> LoginResponse {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Company;

    #[test]
    fn test_list_envelope_both_shapes() {
        let bare: ListEnvelope<Company> =
            serde_json::from_str(r#"[{"id":1,"name":"Acme"}]"#).unwrap();
        let wrapped: ListEnvelope<Company> =
            serde_json::from_str(r#"{"data":[{"id":"1","nama":"Acme"}]}"#).unwrap();
        assert_eq!(bare.into_vec(), wrapped.into_vec());
    }

    #[test]
    fn test_error_body_message_priority() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"message":"Kategori tidak ditemukan","error":"x"}"#).unwrap();
        assert_eq!(body.best_message().as_deref(), Some("Kategori tidak ditemukan"));

        let body: ErrorBody =
            serde_json::from_str(r#"{"message":"","errors":{"tanggal":["Tanggal wajib diisi"]}}"#)
                .unwrap();
        assert_eq!(body.best_message().as_deref(), Some("Tanggal wajib diisi"));

        assert_eq!(ErrorBody::default().best_message(), None);
    }

    #[test]
    fn test_login_envelope() {
        let json = r#"{"access_token":"abc","user":{"id":1,"name":"Root","role":"superadmin"}}"#;
        let login: LoginEnvelope = serde_json::from_str(json).unwrap();
        let login = login.into_inner();
        assert_eq!(login.token, "abc");
        assert!(login.user.company_id.is_none());

        let json = r#"{"data":{"token":"xyz","user":{"id":"5","name":"Sari","role":"admin","company_id":"2"}}}"#;
        let login: LoginEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(login.into_inner().token, "xyz");
    }
}
