// SPDX-License-Identifier: MPL-2.0
//! Forum HTTP endpoints.
//!
//! [`ForumApi`] is the seam the handlers talk to; [`HttpApi`] implements it
//! with `reqwest`. All moderation endpoints take form-encoded POST bodies and
//! report success through the status code alone.

use super::page::SearchResult;
use super::validation::{LoginForm, PostDraft};
use crate::config::ServerConfig;
use reqwest::cookie::Jar;
use reqwest::Url;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

/// Name of the session cookie set by the server on login.
pub const SESSION_COOKIE: &str = "token";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Vote,
    Ban,
    Delete,
    Promote,
    Solution,
    Report,
    Search,
    Login,
    CreatePost,
}

impl Endpoint {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Vote => "/api/vote",
            Endpoint::Ban => "/api/ban",
            Endpoint::Delete => "/api/delete",
            Endpoint::Promote => "/api/promote",
            Endpoint::Solution => "/api/solution",
            Endpoint::Report => "/api/report",
            Endpoint::Search => "/api/search",
            Endpoint::Login => "/login",
            Endpoint::CreatePost => "/create-post",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered outside the 2xx range.
    #[error("HTTP status: {status}")]
    Status { status: u16 },
    /// The request never got an answer (DNS, refused connection, timeout).
    #[error("Transport error: {0}")]
    Transport(String),
    /// The answer could not be decoded.
    #[error("Invalid response: {0}")]
    Decode(String),
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}

/// Form-encoded POST body.
pub type Form = Vec<(&'static str, String)>;

/// Outcome of a page form (login, new post) the server answers with a redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Accepted,
    /// The redirect carried an `error` parameter.
    Rejected { reason: String },
}

impl Submission {
    /// Classifies the final URL of a redirected form post to `endpoint`.
    ///
    /// An `error` parameter carries the server's reason. Landing on the login
    /// page means the session was refused (`"auth"`), and landing back on the
    /// form itself means nothing was accepted (`"unchanged"`).
    #[must_use]
    pub fn from_redirect(endpoint: Endpoint, url: &Url) -> Self {
        if let Some((_, reason)) = url.query_pairs().find(|(name, _)| name == "error") {
            return Submission::Rejected {
                reason: reason.into_owned(),
            };
        }
        let path = url.path().trim_end_matches('/');
        if path == Endpoint::Login.path() {
            Submission::Rejected {
                reason: "auth".to_string(),
            }
        } else if path == endpoint.path() {
            Submission::Rejected {
                reason: "unchanged".to_string(),
            }
        } else {
            Submission::Accepted
        }
    }
}

pub trait ForumApi: Send + Sync {
    /// Sends a form-encoded POST. Any 2xx status is success.
    fn post_form(
        &self,
        endpoint: Endpoint,
        form: Form,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// `GET /api/search?q=`.
    fn search(&self, query: &str)
        -> impl Future<Output = Result<Vec<SearchResult>, ApiError>> + Send;

    fn login(&self, form: &LoginForm) -> impl Future<Output = Result<Submission, ApiError>> + Send;

    fn create_post(
        &self,
        draft: &PostDraft,
    ) -> impl Future<Output = Result<Submission, ApiError>> + Send;
}

/// `reqwest`-backed client sharing one cookie jar across requests.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base: Url,
}

impl HttpApi {
    pub fn new(server: &ServerConfig) -> Result<Self, ApiError> {
        let base =
            Url::parse(&server.base_url).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;

        let jar = Jar::default();
        if let Some(token) = &server.token {
            jar.add_cookie_str(&format!("{SESSION_COOKIE}={token}; Path=/"), &base);
        }

        let client = reqwest::Client::builder()
            .cookie_provider(Arc::new(jar))
            .redirect(reqwest::redirect::Policy::limited(10))
            .timeout(server.timeout())
            .user_agent(concat!("ForumDesk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self { client, base })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, endpoint: Endpoint) -> Result<Url, ApiError> {
        self.base
            .join(endpoint.path())
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))
    }

    /// Rejects non-2xx answers, logging the server's message if any.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), body = %body.trim(), "request rejected");
        Err(ApiError::Status {
            status: status.as_u16(),
        })
    }
}

fn transport(err: reqwest::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

impl ForumApi for HttpApi {
    async fn post_form(&self, endpoint: Endpoint, form: Form) -> Result<(), ApiError> {
        let url = self.url(endpoint)?;
        tracing::debug!(%url, "POST");
        let response = self
            .client
            .post(url)
            .form(&form)
            .send()
            .await
            .map_err(transport)?;
        Self::check(response).await.map(|_| ())
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ApiError> {
        let url = self.url(Endpoint::Search)?;
        tracing::debug!(%url, query, "GET");
        let response = self
            .client
            .get(url)
            .query(&[("q", query)])
            .send()
            .await
            .map_err(transport)?;
        let bytes = Self::check(response)
            .await?
            .bytes()
            .await
            .map_err(transport)?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn login(&self, form: &LoginForm) -> Result<Submission, ApiError> {
        let url = self.url(Endpoint::Login)?;
        let response = self
            .client
            .post(url)
            .form(&[
                ("username", form.username.as_str()),
                ("password", form.password.as_str()),
            ])
            .send()
            .await
            .map_err(transport)?;
        let response = Self::check(response).await?;
        Ok(Submission::from_redirect(Endpoint::Login, response.url()))
    }

    async fn create_post(&self, draft: &PostDraft) -> Result<Submission, ApiError> {
        let url = self.url(Endpoint::CreatePost)?;
        let form = reqwest::multipart::Form::new()
            .text("title", draft.title.clone())
            .text("content", draft.content.clone())
            .text("category_id", draft.category.trim().to_string())
            .text("tags", draft.tags.clone());
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;
        let response = Self::check(response).await?;
        Ok(Submission::from_redirect(Endpoint::CreatePost, response.url()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_rooted() {
        assert_eq!(Endpoint::Vote.path(), "/api/vote");
        assert_eq!(Endpoint::Search.path(), "/api/search");
        assert_eq!(Endpoint::CreatePost.path(), "/create-post");
    }

    #[test]
    fn redirect_without_error_is_accepted() {
        let url = Url::parse("http://localhost:8080/?success=login").expect("valid url");
        assert_eq!(
            Submission::from_redirect(Endpoint::Login, &url),
            Submission::Accepted
        );
    }

    #[test]
    fn redirect_with_error_is_rejected() {
        let url = Url::parse("http://localhost:8080/login?error=invalid").expect("valid url");
        assert_eq!(
            Submission::from_redirect(Endpoint::Login, &url),
            Submission::Rejected {
                reason: "invalid".to_string()
            }
        );
    }

    #[test]
    fn bounce_to_login_is_rejected() {
        let url = Url::parse("http://localhost:8080/login").expect("valid url");
        assert_eq!(
            Submission::from_redirect(Endpoint::CreatePost, &url),
            Submission::Rejected {
                reason: "auth".to_string()
            }
        );
        assert_ne!(
            Submission::from_redirect(Endpoint::Login, &url),
            Submission::Accepted
        );
    }

    #[test]
    fn landing_back_on_form_is_rejected() {
        let url = Url::parse("http://localhost:8080/create-post").expect("valid url");
        assert_eq!(
            Submission::from_redirect(Endpoint::CreatePost, &url),
            Submission::Rejected {
                reason: "unchanged".to_string()
            }
        );
    }

    #[test]
    fn new_post_redirect_to_post_page_is_accepted() {
        let url = Url::parse("http://localhost:8080/post/12?success=created").expect("valid url");
        assert_eq!(
            Submission::from_redirect(Endpoint::CreatePost, &url),
            Submission::Accepted
        );
    }

    #[test]
    fn urls_join_against_base() {
        let api = HttpApi::new(&ServerConfig {
            base_url: "https://forum.example/".to_string(),
            ..ServerConfig::default()
        })
        .expect("client builds");
        let url = api.url(Endpoint::Ban).expect("joins");
        assert_eq!(url.as_str(), "https://forum.example/api/ban");
    }

    #[test]
    fn invalid_base_url_is_reported() {
        let result = HttpApi::new(&ServerConfig {
            base_url: "not a url".to_string(),
            ..ServerConfig::default()
        });
        assert!(matches!(result, Err(ApiError::InvalidUrl(_))));
    }
}
