//! HTTP client for the HR REST API
//!
//! Bearer-token JSON calls plus multipart uploads. Non-2xx responses become
//! [`ClientError::Server`] carrying the server's own message when it sent
//! one, so the caller can show it verbatim.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::response::{ErrorBody, LoginEnvelope, LoginRequest, LoginResponse};

use crate::config::ClientConfig;
use crate::error::GENERIC_FAILURE;
use crate::{ClientError, ClientResult};

/// Form field Laravel-style backends read to treat a POST as a PUT
pub const METHOD_OVERRIDE_FIELD: &str = "_method";

/// One file in a multipart body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Multipart body: scalar fields plus file parts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartPayload {
    fields: Vec<(String, String)>,
    files: Vec<FilePart>,
}

impl MultipartPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten a serializable struct into text fields.
    ///
    /// Nulls are skipped, booleans become `1`/`0`, arrays become repeated
    /// `name[]` fields and nested objects are sent as JSON text.
    pub fn from_serialize<T: Serialize>(payload: &T) -> ClientResult<Self> {
        let value = serde_json::to_value(payload)?;
        let serde_json::Value::Object(map) = value else {
            return Err(ClientError::InvalidResponse(
                "multipart payload must serialize to an object".into(),
            ));
        };
        let mut out = Self::new();
        for (name, value) in map {
            match value {
                serde_json::Value::Array(items) => {
                    let key = format!("{name}[]");
                    for item in items {
                        if let Some(text) = scalar_text(item) {
                            out.fields.push((key.clone(), text));
                        }
                    }
                }
                other => {
                    if let Some(text) = scalar_text(other) {
                        out.fields.push((name, text));
                    }
                }
            }
        }
        Ok(out)
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn part(mut self, part: FilePart) -> Self {
        self.files.push(part);
        self
    }

    pub fn file(
        mut self,
        field: impl Into<String>,
        file_name: impl Into<String>,
        mime: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.files.push(FilePart {
            field: field.into(),
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        });
        self
    }

    /// Mark a POST as an update (`_method=PUT`)
    pub fn method_put(self) -> Self {
        self.text(METHOD_OVERRIDE_FIELD, "PUT")
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn files(&self) -> &[FilePart] {
        &self.files
    }

    /// Value of the first field named `name`
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn into_form(self) -> ClientResult<Form> {
        let mut form = Form::new();
        for (name, value) in self.fields {
            form = form.text(name, value);
        }
        for file in self.files {
            let part = Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(&file.mime)?;
            form = form.part(file.field, part);
        }
        Ok(form)
    }
}

fn scalar_text(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Bool(b) => Some(if b { "1" } else { "0" }.to_string()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// HTTP client trait
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T>;
    async fn get_query<T: DeserializeOwned + Send>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ClientResult<T>;
    async fn post<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn put<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn post_multipart<T: DeserializeOwned + Send>(
        &self,
        path: &str,
        payload: MultipartPayload,
    ) -> ClientResult<T>;
    async fn delete(&self, path: &str) -> ClientResult<()>;
    async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse>;
    async fn logout(&mut self) -> ClientResult<()>;
    fn token(&self) -> Option<&str>;
    fn set_token(&mut self, token: Option<String>);
}

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let mut builder = Client::builder();
        if let Some(seconds) = config.timeout {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorized(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let req = req.header(reqwest::header::ACCEPT, "application/json");
        match self.auth_header() {
            Some(auth) => req.header(reqwest::header::AUTHORIZATION, auth),
            None => req,
        }
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    async fn check_status(&self, response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.best_message());
        tracing::debug!(status = status.as_u16(), ?message, "request rejected");
        match (status, message) {
            (StatusCode::UNAUTHORIZED, None) => Err(ClientError::Unauthorized),
            (status, message) => Err(ClientError::Server {
                status: status.as_u16(),
                message: message.unwrap_or_else(|| GENERIC_FAILURE.to_string()),
            }),
        }
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let response = self.check_status(response).await?;
        let text = response.text().await?;
        // Some mutations answer 200 with an empty body
        let text = if text.trim().is_empty() { "null" } else { text.as_str() };
        serde_json::from_str(text).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let response = self.authorized(self.client.get(&url)).send().await?;
        self.handle_response(response).await
    }

    async fn get_query<T: DeserializeOwned + Send>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, ?query, "GET");
        let response = self
            .authorized(self.client.get(&url).query(query))
            .send()
            .await?;
        self.handle_response(response).await
    }

    async fn post<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        let response = self
            .authorized(self.client.post(&url).json(body))
            .send()
            .await?;
        self.handle_response(response).await
    }

    async fn put<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "PUT");
        let response = self
            .authorized(self.client.put(&url).json(body))
            .send()
            .await?;
        self.handle_response(response).await
    }

    async fn post_multipart<T: DeserializeOwned + Send>(
        &self,
        path: &str,
        payload: MultipartPayload,
    ) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(
            %url,
            fields = payload.fields().len(),
            files = payload.files().len(),
            "POST multipart"
        );
        let form = payload.into_form()?;
        let response = self
            .authorized(self.client.post(&url).multipart(form))
            .send()
            .await?;
        self.handle_response(response).await
    }

    async fn delete(&self, path: &str) -> ClientResult<()> {
        let url = self.url(path);
        tracing::debug!(%url, "DELETE");
        let response = self.authorized(self.client.delete(&url)).send().await?;
        self.check_status(response).await?;
        Ok(())
    }

    async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let resp: LoginEnvelope = self.post("login", &req).await?;
        let login = resp.into_inner();
        if login.token.is_empty() {
            return Err(ClientError::InvalidResponse("Missing login token".into()));
        }
        Ok(login)
    }

    async fn logout(&mut self) -> ClientResult<()> {
        let result: ClientResult<serde_json::Value> = self.post("logout", &()).await;
        self.token = None;
        result.map(|_| ())
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::types::RecordId;

    #[derive(Serialize)]
    struct Draft {
        employee_id: Option<RecordId>,
        tanggal: Option<String>,
        jumlah: Decimal,
        peserta: Vec<RecordId>,
        aktif: bool,
    }

    #[test]
    fn test_multipart_from_serialize() {
        let draft = Draft {
            employee_id: Some(RecordId::from(10)),
            tanggal: None,
            jumlah: Decimal::from(1500),
            peserta: vec![RecordId::from(1), RecordId::new("2")],
            aktif: true,
        };
        let payload = MultipartPayload::from_serialize(&draft).unwrap().method_put();
        assert_eq!(payload.field("employee_id"), Some("10"));
        assert_eq!(payload.field("tanggal"), None);
        assert_eq!(payload.field("jumlah"), Some("1500"));
        assert_eq!(payload.field("aktif"), Some("1"));
        assert_eq!(payload.field(METHOD_OVERRIDE_FIELD), Some("PUT"));
        let peserta: Vec<_> = payload
            .fields()
            .iter()
            .filter(|(k, _)| k == "peserta[]")
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(peserta, vec!["1", "2"]);
    }

    #[test]
    fn test_multipart_rejects_non_object() {
        assert!(MultipartPayload::from_serialize(&vec![1, 2]).is_err());
    }

    #[test]
    fn test_url_join() {
        let client = NetworkHttpClient::new(&ClientConfig::new("http://h/api/")).unwrap();
        assert_eq!(client.url("/cuti/me"), "http://h/api/cuti/me");
        assert_eq!(client.url("kasbon"), "http://h/api/kasbon");
    }
}
