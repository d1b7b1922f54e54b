// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP protocol implementation for the `SmartPrugio` cloud API.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue,
    USER_AGENT,
};

use crate::command::{CERTIFICATION_TYPE, ControlRequest};
use crate::error::{ConfigError, ProtocolError};
use crate::protocol::Protocol;
use crate::response::{ControlResponse, DeviceListing};
use crate::types::Category;

// ============================================================================
// HttpConfig - Connection parameters for the cloud API
// ============================================================================

/// Configuration for the cloud API client.
///
/// Holds the API endpoint, the static client identification headers and the
/// account credentials. Credentials are only checked when the client is
/// built, see [`HttpConfig::into_client`].
///
/// # Examples
///
/// ```
/// use smartprugio_lib::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new()
///     .with_credentials("token-value", "Bearer abc")
///     .with_read_timeout(Duration::from_secs(10));
///
/// assert_eq!(config.base_url(), HttpConfig::DEFAULT_BASE_URL);
/// assert!(config.into_client().is_ok());
///
/// // Credentials are mandatory
/// assert!(HttpConfig::new().into_client().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    base_url: String,
    app_version: String,
    user_agent: String,
    token: Option<String>,
    auth: Option<String>,
    read_timeout: Duration,
    write_timeout: Duration,
}

impl HttpConfig {
    /// Default API endpoint.
    pub const DEFAULT_BASE_URL: &'static str = "https://svc.smartprugio.com:18888";
    /// Default `app_version` header.
    pub const DEFAULT_APP_VERSION: &'static str = "1.7.0-v84";
    /// Default `User-Agent` header.
    pub const DEFAULT_USER_AGENT: &'static str = "Smart Home/24";
    /// Default timeout for list queries. Listings are larger than control
    /// acknowledgements.
    pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(8);
    /// Default timeout for control requests.
    pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(5);

    /// Creates a configuration with default endpoint and headers and no
    /// credentials.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            app_version: Self::DEFAULT_APP_VERSION.to_string(),
            user_agent: Self::DEFAULT_USER_AGENT.to_string(),
            token: None,
            auth: None,
            read_timeout: Self::DEFAULT_READ_TIMEOUT,
            write_timeout: Self::DEFAULT_WRITE_TIMEOUT,
        }
    }

    /// Sets the API endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the `app_version` header.
    #[must_use]
    pub fn with_app_version(mut self, app_version: impl Into<String>) -> Self {
        self.app_version = app_version.into();
        self
    }

    /// Sets the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the `token` and `Authorization` header values.
    #[must_use]
    pub fn with_credentials(mut self, token: impl Into<String>, auth: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self.auth = Some(auth.into());
        self
    }

    /// Sets the `token` header value.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the `Authorization` header value.
    #[must_use]
    pub fn with_auth(mut self, auth: impl Into<String>) -> Self {
        self.auth = Some(auth.into());
        self
    }

    /// Sets the list query timeout.
    #[must_use]
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Sets the control request timeout.
    #[must_use]
    pub fn with_write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = timeout;
        self
    }

    /// Returns the API endpoint.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the `app_version` header value.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }

    /// Returns the `User-Agent` header value.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Returns `true` if both token and authorization are set and non-blank.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.token) && present(&self.auth)
    }

    /// Returns the list query timeout.
    #[must_use]
    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    /// Returns the control request timeout.
    #[must_use]
    pub fn write_timeout(&self) -> Duration {
        self.write_timeout
    }

    /// Creates an `HttpClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingCredentials` if the token or the
    /// authorization value is absent, `ConfigError::InvalidBaseUrl` if the
    /// endpoint is not an `http(s)` URL, and `ConfigError::InvalidHeader` if a
    /// header value contains characters HTTP cannot carry.
    pub fn into_client(self) -> Result<HttpClient, ConfigError> {
        if !self.has_credentials() {
            return Err(ConfigError::MissingCredentials);
        }

        let base_url = self.base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.base_url));
        }

        let token = self.token.unwrap_or_default();
        let auth = self.auth.unwrap_or_default();

        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("app_version"),
            header_value("app_version", &self.app_version)?,
        );
        headers.insert(USER_AGENT, header_value("User-Agent", &self.user_agent)?);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(HeaderName::from_static("token"), header_value("token", &token)?);
        headers.insert(AUTHORIZATION, header_value("Authorization", &auth)?);

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ConfigError::ClientInit(e.to_string()))?;

        Ok(HttpClient {
            base_url,
            client,
            read_timeout: self.read_timeout,
            write_timeout: self.write_timeout,
        })
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, ConfigError> {
    let mut value = HeaderValue::from_str(value).map_err(|_| ConfigError::InvalidHeader(name))?;
    if matches!(name, "token" | "Authorization") {
        value.set_sensitive(true);
    }
    Ok(value)
}

// ============================================================================
// HttpClient - Cloud API client
// ============================================================================

/// HTTP client for the `SmartPrugio` cloud API.
///
/// Stateless apart from its configuration: it can be cloned and shared by
/// every accessory of a category. Authentication headers are attached to
/// every request.
///
/// # Examples
///
/// ```no_run
/// use smartprugio_lib::protocol::{HttpConfig, Protocol};
/// use smartprugio_lib::types::Category;
///
/// # async fn example() -> smartprugio_lib::Result<()> {
/// let client = HttpConfig::new()
///     .with_credentials("token-value", "auth-value")
///     .into_client()?;
///
/// let listing = client.list_devices(Category::Lights).await?;
/// for device in listing.devices() {
///     println!("{:?}", device.device_id);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: Client,
    read_timeout: Duration,
    write_timeout: Duration,
}

impl HttpClient {
    /// Returns the API endpoint.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the list query URL for a category.
    fn list_url(&self, category: Category) -> String {
        format!(
            "{}/v1/control/device?certf_tp_cd={}&ctl_tp_cd={}",
            self.base_url,
            urlencoding::encode(CERTIFICATION_TYPE),
            urlencoding::encode(category.as_str())
        )
    }

    /// Builds the control URL.
    fn control_url(&self) -> String {
        format!("{}/v1/control/device", self.base_url)
    }

    /// Sends a prepared request and returns the body of a successful answer.
    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
        timeout: Duration,
    ) -> Result<String, ProtocolError> {
        let response = request
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProtocolError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        response.text().await.map_err(|e| classify(e, timeout))
    }
}

/// Maps a transport error, singling out timeouts.
fn classify(error: reqwest::Error, timeout: Duration) -> ProtocolError {
    if error.is_timeout() {
        ProtocolError::Timeout(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX))
    } else {
        ProtocolError::Http(error)
    }
}

impl Protocol for HttpClient {
    async fn list_devices(&self, category: Category) -> Result<DeviceListing, ProtocolError> {
        let url = self.list_url(category);

        tracing::debug!(url = %url, category = %category, "Listing devices");

        let body = self
            .execute(self.client.get(&url), self.read_timeout)
            .await?;

        tracing::debug!(category = %category, bytes = body.len(), "Received device listing");

        Ok(DeviceListing::parse(&body)?)
    }

    async fn control_device(
        &self,
        request: &ControlRequest,
    ) -> Result<ControlResponse, ProtocolError> {
        let url = self.control_url();

        tracing::debug!(
            url = %url,
            category = %request.category(),
            device_id = %request.device_id(),
            attributes = request.attributes().len(),
            "Sending control request"
        );

        let body = self
            .execute(self.client.post(&url).json(request), self.write_timeout)
            .await?;

        tracing::debug!(body = %body, "Received control acknowledgement");

        Ok(ControlResponse::new(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> HttpClient {
        HttpConfig::new()
            .with_base_url("https://api.example.test:18888/")
            .with_credentials("tok", "auth")
            .into_client()
            .unwrap()
    }

    #[test]
    fn list_url_is_scoped_to_category() {
        let client = client();
        assert_eq!(
            client.list_url(Category::Lights),
            "https://api.example.test:18888/v1/control/device?certf_tp_cd=KAKAO&ctl_tp_cd=LIGHTS"
        );
        assert_eq!(
            client.list_url(Category::Heating),
            "https://api.example.test:18888/v1/control/device?certf_tp_cd=KAKAO&ctl_tp_cd=HEATING"
        );
    }

    #[test]
    fn control_url() {
        assert_eq!(
            client().control_url(),
            "https://api.example.test:18888/v1/control/device"
        );
    }

    #[test]
    fn config_default_values() {
        let config = HttpConfig::new();
        assert_eq!(config.base_url(), "https://svc.smartprugio.com:18888");
        assert_eq!(config.app_version(), "1.7.0-v84");
        assert_eq!(config.user_agent(), "Smart Home/24");
        assert_eq!(config.read_timeout(), Duration::from_secs(8));
        assert_eq!(config.write_timeout(), Duration::from_secs(5));
        assert!(!config.has_credentials());
    }

    #[test]
    fn missing_token_fails_fast() {
        let result = HttpConfig::new().with_auth("auth").into_client();
        assert!(matches!(result, Err(ConfigError::MissingCredentials)));
    }

    #[test]
    fn missing_auth_fails_fast() {
        let result = HttpConfig::new().with_token("tok").into_client();
        assert!(matches!(result, Err(ConfigError::MissingCredentials)));
    }

    #[test]
    fn blank_credentials_are_missing() {
        let result = HttpConfig::new().with_credentials("  ", "auth").into_client();
        assert!(matches!(result, Err(ConfigError::MissingCredentials)));
    }

    #[test]
    fn base_url_must_be_http() {
        let result = HttpConfig::new()
            .with_base_url("svc.smartprugio.com")
            .with_credentials("tok", "auth")
            .into_client();
        assert!(matches!(result, Err(ConfigError::InvalidBaseUrl(_))));
    }

    #[test]
    fn header_values_are_validated() {
        let result = HttpConfig::new()
            .with_credentials("tok\nen", "auth")
            .into_client();
        assert!(matches!(result, Err(ConfigError::InvalidHeader("token"))));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        assert_eq!(client().base_url(), "https://api.example.test:18888");
    }

    #[test]
    fn config_builder_chain() {
        let config = HttpConfig::new()
            .with_base_url("http://localhost:8080")
            .with_app_version("2.0")
            .with_user_agent("Test/1")
            .with_credentials("tok", "auth")
            .with_read_timeout(Duration::from_millis(250))
            .with_write_timeout(Duration::from_millis(150));

        assert_eq!(config.base_url(), "http://localhost:8080");
        assert_eq!(config.app_version(), "2.0");
        assert_eq!(config.user_agent(), "Test/1");
        assert!(config.has_credentials());
        assert_eq!(config.read_timeout(), Duration::from_millis(250));
        assert_eq!(config.write_timeout(), Duration::from_millis(150));
    }
}
