//! Shared HTTP transport for chat completion endpoints.
//!
//! `HttpProvider` wraps a `reqwest::Client` with pre-configured headers and
//! endpoint URL. TLS policy is decided by whoever builds the client.

use crate::Auth;
use anyhow::Result;
use pcore::{Error, Model, Request, Response};
use reqwest::{
    Client, Method,
    header::{self, HeaderMap, HeaderValue},
};

/// The user agent sent with every request.
pub const USER_AGENT: &str = concat!("parley/", env!("CARGO_PKG_VERSION"));

/// HTTP transport for a chat completion endpoint.
///
/// Holds a `reqwest::Client`, pre-built headers (auth + content-type),
/// and the target endpoint URL.
#[derive(Clone)]
pub struct HttpProvider {
    client: Client,
    headers: HeaderMap,
    endpoint: String,
}

impl HttpProvider {
    /// Create a provider with Bearer token authentication.
    pub fn bearer(client: Client, token: &str, endpoint: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
        headers.insert(header::AUTHORIZATION, format!("Bearer {token}").parse()?);
        Ok(Self {
            client,
            headers,
            endpoint: endpoint.to_owned(),
        })
    }

    /// Acquire a token from `auth` and create a bearer provider.
    ///
    /// The token is fetched once and never refreshed.
    pub async fn connect(
        client: Client,
        auth: &impl Auth,
        credential: &str,
        endpoint: &str,
    ) -> Result<Self> {
        let token = auth.token(&client, credential).await?;
        tracing::debug!("acquired access token for {endpoint}");
        Self::bearer(client, &token, endpoint)
    }

    /// Get the endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get a reference to the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

impl Model for HttpProvider {
    async fn send(&self, request: &Request) -> pcore::Result<Response> {
        tracing::trace!("request: {}", serde_json::to_string(request)?);
        let response = self
            .client
            .request(Method::POST, &self.endpoint)
            .headers(self.headers.clone())
            .json(request)
            .send()
            .await
            .map_err(anyhow::Error::from)?;

        let status = response.status();
        let text = response.text().await.map_err(anyhow::Error::from)?;
        tracing::trace!("response: {text}");
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(Into::into)
    }
}
