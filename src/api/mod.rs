//! Remote users API: wire types and the HTTP client.
//!
//! Endpoints, relative to the configured base URL:
//! - `GET    users`      -> `[User]`
//! - `POST   users`      -> `User` (body: `NewUser`)
//! - `DELETE user/{id}`  -> body ignored
//!
use std::fmt;
use std::time::Duration;

use reqwest::Method;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ApiError, Result};

/// Default base URL of the users service.
pub const DEFAULT_API_URL: &str = "https://crud-app-node-production.up.railway.app";

/// Server-assigned user identifier. Opaque: the service may hand out numbers or strings.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{n}"),
            UserId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// Body of a create request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

/// HTTP client for the users service.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base: Url,
    http: reqwest::Client,
}

impl ApiClient {
    /// Build a client for `base`. `timeout` bounds every request when set.
    pub fn new(base: Url, timeout: Option<Duration>) -> Result<Self> {
        if base.cannot_be_a_base() {
            return Err(ApiError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|source| ApiError::Transport {
            url: base.to_string(),
            source,
        })?;
        Ok(Self { base, http })
    }

    /// Append path segments to the base URL. Segments are percent-encoded,
    /// so an id containing `/` stays a single segment.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut endpoint = self.base.clone();
        endpoint
            .path_segments_mut()
            .map_err(|_| ApiError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(endpoint)
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        let url = self.endpoint(&["users"])?;
        let response = self.send(Method::GET, &url, self.http.get(url.clone())).await?;
        let users: Vec<User> = decode(response, &url).await?;
        tracing::debug!(count = users.len(), "loaded users");
        Ok(users)
    }

    pub async fn create_user(&self, new_user: &NewUser) -> Result<User> {
        let url = self.endpoint(&["users"])?;
        let request = self.http.post(url.clone()).json(new_user);
        let response = self.send(Method::POST, &url, request).await?;
        let user: User = decode(response, &url).await?;
        tracing::info!(id = %user.id, name = %user.name, "created user");
        Ok(user)
    }

    pub async fn delete_user(&self, id: &UserId) -> Result<()> {
        let id_segment = id.to_string();
        let url = self.endpoint(&["user", id_segment.as_str()])?;
        self.send(Method::DELETE, &url, self.http.delete(url.clone()))
            .await?;
        tracing::info!(%id, "deleted user");
        Ok(())
    }

    async fn send(
        &self,
        method: Method,
        url: &Url,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response> {
        tracing::debug!(%method, %url, "sending request");
        let response = request.send().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                method,
                url: url.to_string(),
                status,
            });
        }
        Ok(response)
    }
}

async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response, url: &Url) -> Result<T> {
    response.json::<T>().await.map_err(|source| ApiError::Decode {
        url: url.to_string(),
        source,
    })
}
