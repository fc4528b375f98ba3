//! Credential and refresh-token exchange
//!
//! [`AuthSession`] talks to the two security endpoints and nothing else. It
//! keeps no mutable state: every successful call returns a fresh [`Token`]
//! pair read from the response cookies, and holding on to the old pair is
//! the caller's business.

use reqwest::header;
use suft_domain::{Result, SuftError, Token};
use tracing::debug;

use crate::config::ClientConfig;
use crate::transport_error;

const AUTHENTICATE_PATH: &str = "security/authenticate";
const REFRESH_PATH: &str = "security/refresh-token";

/// Cookie carrying the short-lived bearer token.
pub(crate) const ACCESS_COOKIE: &str = "Access-token";
/// Cookie carrying the long-lived renewal token.
pub(crate) const REFRESH_COOKIE: &str = "Refresh-token";

/// Header the service uses to select its password authentication scheme.
pub(crate) const AUTH_METHOD_HEADER: &str = "Auth-method";
pub(crate) const AUTH_METHOD: &str = "Password";

/// Stateless client for the authentication endpoints.
#[derive(Debug, Clone)]
pub struct AuthSession {
    http: reqwest::Client,
    base_url: String,
}

impl AuthSession {
    /// Create an auth session for the configured API root.
    ///
    /// # Errors
    /// Returns [`SuftError::Config`] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self { http: config.build_http()?, base_url: config.base_url().to_string() })
    }

    /// Exchange credentials for a token pair.
    ///
    /// # Errors
    /// - [`SuftError::InvalidInput`] when login or password is empty
    /// - [`SuftError::Auth`] when the service rejects the credentials
    /// - [`SuftError::Transport`] on network failure
    pub async fn authenticate(&self, login: &str, password: &str) -> Result<Token> {
        if login.is_empty() || password.is_empty() {
            return Err(SuftError::InvalidInput("login and password must be non-empty".into()));
        }

        debug!(login, "authenticating against {AUTHENTICATE_PATH}");
        let body = serde_json::json!({ "username": login, "password": password });
        let response = self
            .http
            .post(format!("{}{AUTHENTICATE_PATH}", self.base_url))
            .header(AUTH_METHOD_HEADER, AUTH_METHOD)
            .json(&body)
            .send()
            .await
            .map_err(|err| transport_error(&err))?;

        Self::tokens_from(response).await
    }

    /// Exchange a refresh token for a new token pair.
    ///
    /// Safe to call repeatedly; the service does not invalidate the old pair
    /// from the caller's perspective.
    ///
    /// # Errors
    /// Same taxonomy as [`authenticate`](Self::authenticate).
    pub async fn refresh(&self, refresh_token: &str) -> Result<Token> {
        if refresh_token.is_empty() {
            return Err(SuftError::InvalidInput("refresh token must be non-empty".into()));
        }

        debug!("refreshing session via {REFRESH_PATH}");
        let response = self
            .http
            .put(format!("{}{REFRESH_PATH}", self.base_url))
            .header(AUTH_METHOD_HEADER, AUTH_METHOD)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::COOKIE, format!("{REFRESH_COOKIE}={refresh_token}"))
            .send()
            .await
            .map_err(|err| transport_error(&err))?;

        Self::tokens_from(response).await
    }

    /// Read the token pair from the `Set-Cookie` headers of a security
    /// endpoint response.
    async fn tokens_from(response: reqwest::Response) -> Result<Token> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SuftError::Auth { status: status.as_u16(), body });
        }

        let mut access = None;
        let mut refresh = None;
        for cookie in response.cookies() {
            match cookie.name() {
                ACCESS_COOKIE => access = Some(cookie.value().to_string()),
                REFRESH_COOKIE => refresh = Some(cookie.value().to_string()),
                _ => {}
            }
        }

        match (access, refresh) {
            (Some(access_token), Some(refresh_token)) => {
                Ok(Token { access_token, refresh_token })
            }
            _ => Err(SuftError::Decode(
                "security response did not set both token cookies".into(),
            )),
        }
    }
}
