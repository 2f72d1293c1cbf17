//! Transport and credentials for the parley client.
//!
//! `HttpProvider` posts chat completion requests to an endpoint and
//! implements [`pcore::Model`]. Bearer tokens come from an [`Auth`]
//! implementation, fetched once when the provider connects.

pub use auth::{Auth, OAuth, StaticToken};
pub use http::HttpProvider;
pub use reqwest::{self, Client};

mod auth;
mod http;

/// Default chat completion endpoint.
pub const CHAT_ENDPOINT: &str = "https://gigachat.devices.sberbank.ru/api/v1/chat/completions";

/// Default OAuth endpoint.
pub const OAUTH_ENDPOINT: &str = "https://ngw.devices.sberbank.ru:9443/api/v2/oauth";

/// Default OAuth scope.
pub const OAUTH_SCOPE: &str = "GIGACHAT_API_PERS";
