//! Credential acquisition.

use anyhow::{Context, Result};
use reqwest::{Client, header};
use serde::Deserialize;
use ulid::Ulid;

/// Exchanges a long-lived credential for a bearer token.
pub trait Auth {
    /// Fetch a bearer token.
    fn token(
        &self,
        client: &Client,
        credential: &str,
    ) -> impl Future<Output = Result<String>> + Send;
}

/// A pre-issued token, used as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticToken;

impl Auth for StaticToken {
    async fn token(&self, _client: &Client, credential: &str) -> Result<String> {
        Ok(credential.to_owned())
    }
}

/// OAuth client-credentials exchange.
///
/// Posts `scope=<scope>` as a form with `Authorization: Basic <credential>`
/// and a fresh `RqUID` request id, then reads `access_token`.
#[derive(Debug, Clone)]
pub struct OAuth {
    endpoint: String,
    scope: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl OAuth {
    /// Create an exchange against the given endpoint and scope
    pub fn new(endpoint: impl Into<String>, scope: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            scope: scope.into(),
        }
    }

    /// The token endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for OAuth {
    fn default() -> Self {
        Self::new(crate::OAUTH_ENDPOINT, crate::OAUTH_SCOPE)
    }
}

impl Auth for OAuth {
    async fn token(&self, client: &Client, credential: &str) -> Result<String> {
        let response = client
            .post(&self.endpoint)
            .header(header::AUTHORIZATION, format!("Basic {credential}"))
            .header(header::ACCEPT, "application/json")
            .header(header::USER_AGENT, crate::http::USER_AGENT)
            .header("RqUID", request_id())
            .form(&[("scope", self.scope.as_str())])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            anyhow::bail!("token request failed with status {status}: {text}");
        }

        let token: TokenResponse =
            serde_json::from_str(&text).context("token response has no access_token")?;
        Ok(token.access_token)
    }
}

/// A fresh request id rendered in the 8-4-4-4-12 hex layout.
fn request_id() -> String {
    let hex = format!("{:032x}", Ulid::new().0);
    format!(
        "{}-{}-{}-{}-{}",
        &hex[..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..]
    )
}
