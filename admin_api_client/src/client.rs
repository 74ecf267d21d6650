use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};
use url::Url;

use crate::{ApiError, LoginData, UsersPage};

/// Operations the dashboard performs against the remote admin API.
///
/// `token` is the access token of the current session. When it is `None`
/// or empty the request goes out without an `Authorization` header.
#[async_trait]
pub trait AdminGateway: Send + Sync {
    /// `Ok(None)` means the credentials were rejected.
    async fn login(&self, email: &str, password: &str) -> Result<Option<LoginData>, ApiError>;

    async fn users(&self, token: Option<&str>, page: u32, limit: u32) -> Result<UsersPage, ApiError>;

    async fn delete_user(&self, token: Option<&str>, user_id: &str) -> Result<(), ApiError>;

    /// The stats payload is opaque to the dashboard.
    async fn monthly_stats(&self, token: Option<&str>, year: i32, month: u32) -> Result<Value, ApiError>;
}

#[derive(Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct LoginResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<LoginData>,
}

pub struct AdminApi {
    client: Client,
    base_url: Url,
}

impl AdminApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(base_url)?;
        // Url::join replaces the last segment unless the path ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(Self {
            client: Client::builder()
                .timeout(timeout)
                .default_headers(headers)
                .build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Every outgoing request is built here so the bearer token is attached in one place.
    fn request(&self, method: Method, url: Url, token: Option<&str>) -> Result<RequestBuilder, ApiError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {}", token))?);
        }
        Ok(self.client.request(method, url).headers(headers))
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        debug!(url = %response.url(), %status, "remote API responded");

        match status {
            StatusCode::UNAUTHORIZED => {
                warn!(url = %response.url(), "remote API answered 401");
                Err(ApiError::Unauthorized)
            }
            s if !s.is_success() => Err(ApiError::Status(s.as_u16())),
            _ => Ok(response),
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl AdminGateway for AdminApi {
    async fn login(&self, email: &str, password: &str) -> Result<Option<LoginData>, ApiError> {
        let url = self.endpoint("auth/login")?;
        let response = self
            .request(Method::POST, url, None)?
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        // A rejected login is not an expired session: read the body whatever the status.
        let status = response.status();
        let bytes = response.bytes().await?;
        match serde_json::from_slice::<LoginResponse>(&bytes) {
            Ok(LoginResponse { success: true, data: Some(data) }) => Ok(Some(data)),
            Ok(_) => Ok(None),
            Err(e) => {
                debug!(%status, error = %e, "login response was not understood");
                Ok(None)
            }
        }
    }

    async fn users(&self, token: Option<&str>, page: u32, limit: u32) -> Result<UsersPage, ApiError> {
        let mut url = self.endpoint("admin/users")?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string());

        let response = self.send(self.request(Method::GET, url, token)?).await?;
        let envelope: DataEnvelope<UsersPage> = Self::decode(response).await?;
        Ok(envelope.data)
    }

    async fn delete_user(&self, token: Option<&str>, user_id: &str) -> Result<(), ApiError> {
        let mut url = self.endpoint("admin/users")?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .push(user_id);

        self.send(self.request(Method::DELETE, url, token)?).await?;
        Ok(())
    }

    async fn monthly_stats(&self, token: Option<&str>, year: i32, month: u32) -> Result<Value, ApiError> {
        let mut url = self.endpoint("admin/stats/monthly")?;
        url.query_pairs_mut()
            .append_pair("year", &year.to_string())
            .append_pair("month", &month.to_string());

        let response = self.send(self.request(Method::GET, url, token)?).await?;
        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_keep_the_base_path() {
        let api = AdminApi::new("http://api.example.test/v1", Duration::from_secs(5)).unwrap();
        assert_eq!(api.base_url().as_str(), "http://api.example.test/v1/");
        assert_eq!(
            api.endpoint("/admin/users").unwrap().as_str(),
            "http://api.example.test/v1/admin/users"
        );
    }

    #[test]
    fn rejects_a_relative_base_url() {
        assert!(matches!(
            AdminApi::new("not a url", Duration::from_secs(5)),
            Err(ApiError::Url(_))
        ));
    }
}
