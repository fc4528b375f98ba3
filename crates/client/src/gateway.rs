//! Authenticated HTTP dispatch
//!
//! Every resource call goes through [`HttpGateway::send`], which attaches
//! the access-token cookie and owns the one recovery action the client has:
//! on a 401 it refreshes the token pair and resends the identical request
//! exactly once. The held pair lives behind a mutex so concurrent callers
//! serialize on the refresh and all observe the rotated tokens.

use reqwest::{header, Method, Response, StatusCode};
use serde_json::Value;
use suft_domain::{Result, SuftError, Token};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::auth::{AuthSession, ACCESS_COOKIE, AUTH_METHOD, AUTH_METHOD_HEADER};
use crate::config::ClientConfig;
use crate::transport_error;

/// Single choke point for authenticated resource traffic.
pub struct HttpGateway {
    http: reqwest::Client,
    base_url: String,
    auth: AuthSession,
    tokens: Mutex<Token>,
}

impl HttpGateway {
    /// Create a gateway holding an already-issued token pair.
    ///
    /// # Errors
    /// Returns [`SuftError::Config`] if the HTTP client cannot be built.
    pub fn new(token: Token, config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            http: config.build_http()?,
            base_url: config.base_url().to_string(),
            auth: AuthSession::new(config)?,
            tokens: Mutex::new(token),
        })
    }

    /// Snapshot of the held token pair, for persistence by the caller.
    pub async fn token(&self) -> Token {
        self.tokens.lock().await.clone()
    }

    /// Send an authenticated request, refreshing the session once if the
    /// access token is rejected.
    ///
    /// The response is returned unmodified; interpreting its status is the
    /// caller's responsibility.
    ///
    /// # Errors
    /// - [`SuftError::Transport`] on network failure (no retry)
    /// - [`SuftError::SessionExpired`] when a 401 persists after the single
    ///   refresh-and-retry, or the refresh itself is rejected
    pub async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<Response> {
        let access = self.tokens.lock().await.access_token.clone();
        let response = self.dispatch(&method, path, body.as_ref(), &access).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        debug!(%method, path, "access token rejected, refreshing session");
        let access = self.rotate(&access).await?;

        let retried = self.dispatch(&method, path, body.as_ref(), &access).await?;
        if retried.status() == StatusCode::UNAUTHORIZED {
            warn!(%method, path, "refreshed token rejected by the service");
            return Err(SuftError::SessionExpired);
        }
        Ok(retried)
    }

    async fn dispatch(
        &self,
        method: &Method,
        path: &str,
        body: Option<&Value>,
        access: &str,
    ) -> Result<Response> {
        let url = format!("{}{path}", self.base_url);
        debug!(%method, %url, "sending request");

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(AUTH_METHOD_HEADER, AUTH_METHOD)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::COOKIE, format!("{ACCESS_COOKIE}={access}"));
        if let Some(body) = body {
            request = request.json(body);
        }

        request.send().await.map_err(|err| transport_error(&err))
    }

    /// Replace the held token pair after a 401, serializing concurrent
    /// recoveries.
    ///
    /// `stale_access` is the access token the failed request carried. If the
    /// held token already differs, another caller completed the refresh
    /// while this request was in flight, and its pair is reused as-is.
    async fn rotate(&self, stale_access: &str) -> Result<String> {
        let mut held = self.tokens.lock().await;
        if held.access_token != stale_access {
            debug!("session already refreshed by a concurrent caller");
            return Ok(held.access_token.clone());
        }

        let fresh = self.auth.refresh(&held.refresh_token).await.map_err(|err| match err {
            SuftError::Transport(msg) => SuftError::Transport(msg),
            _ => SuftError::SessionExpired,
        })?;
        *held = fresh;
        Ok(held.access_token.clone())
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::auth::REFRESH_COOKIE;

    async fn gateway_for(server: &MockServer, token: Token) -> HttpGateway {
        let config = ClientConfig::new(server.uri()).unwrap();
        HttpGateway::new(token, &config).unwrap()
    }

    fn refreshed_pair(access: &str, refresh: &str) -> ResponseTemplate {
        ResponseTemplate::new(200)
            .append_header("Set-Cookie", format!("{ACCESS_COOKIE}={access}; Path=/").as_str())
            .append_header("Set-Cookie", format!("{REFRESH_COOKIE}={refresh}; Path=/").as_str())
    }

    #[tokio::test]
    async fn attaches_auth_headers_and_access_cookie() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/schedules"))
            .and(header(AUTH_METHOD_HEADER, AUTH_METHOD))
            .and(header("Cookie", format!("{ACCESS_COOKIE}=acc-0").as_str()))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = gateway_for(&server, Token::new("acc-0", "ref-0")).await;
        let response = gateway.send(Method::GET, "api/v1/schedules", None).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn a_401_triggers_one_refresh_and_one_retry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/schedules"))
            .and(header("Cookie", format!("{ACCESS_COOKIE}=acc-0").as_str()))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/security/refresh-token"))
            .and(header("Cookie", format!("{REFRESH_COOKIE}=ref-0").as_str()))
            .respond_with(refreshed_pair("acc-1", "ref-1"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/schedules"))
            .and(header("Cookie", format!("{ACCESS_COOKIE}=acc-1").as_str()))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = gateway_for(&server, Token::new("acc-0", "ref-0")).await;
        let response = gateway.send(Method::GET, "api/v1/schedules", None).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        // The rotated pair stays usable for subsequent calls.
        assert_eq!(gateway.token().await, Token::new("acc-1", "ref-1"));
    }

    #[tokio::test]
    async fn a_second_401_is_session_expired_without_another_refresh() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/schedules"))
            .respond_with(ResponseTemplate::new(401))
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/security/refresh-token"))
            .respond_with(refreshed_pair("acc-1", "ref-1"))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = gateway_for(&server, Token::new("acc-0", "ref-0")).await;
        let err = gateway.send(Method::GET, "api/v1/schedules", None).await.unwrap_err();
        assert!(matches!(err, SuftError::SessionExpired));
    }

    #[tokio::test]
    async fn a_rejected_refresh_is_session_expired() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/schedules"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/security/refresh-token"))
            .respond_with(ResponseTemplate::new(403).set_body_string("refresh token revoked"))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = gateway_for(&server, Token::new("acc-0", "ref-0")).await;
        let err = gateway.send(Method::GET, "api/v1/schedules", None).await.unwrap_err();
        assert!(matches!(err, SuftError::SessionExpired));
    }

    #[tokio::test]
    async fn concurrent_401_recoveries_share_a_single_refresh() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/schedules"))
            .and(header("Cookie", format!("{ACCESS_COOKIE}=acc-0").as_str()))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/security/refresh-token"))
            .respond_with(refreshed_pair("acc-1", "ref-1"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/schedules"))
            .and(header("Cookie", format!("{ACCESS_COOKIE}=acc-1").as_str()))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let gateway = gateway_for(&server, Token::new("acc-0", "ref-0")).await;
        let (first, second) = tokio::join!(
            gateway.send(Method::GET, "api/v1/schedules", None),
            gateway.send(Method::GET, "api/v1/schedules", None),
        );

        assert_eq!(first.unwrap().status(), StatusCode::OK);
        assert_eq!(second.unwrap().status(), StatusCode::OK);
        assert_eq!(gateway.token().await, Token::new("acc-1", "ref-1"));
    }

    #[tokio::test]
    async fn transport_failures_are_not_retried() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = ClientConfig::new(format!("http://{addr}/")).unwrap();
        let gateway = HttpGateway::new(Token::new("acc-0", "ref-0"), &config).unwrap();

        let err = gateway.send(Method::GET, "api/v1/schedules", None).await.unwrap_err();
        assert!(matches!(err, SuftError::Transport(_)));
    }

    #[tokio::test]
    async fn request_bodies_are_resent_verbatim_on_retry() {
        let server = MockServer::start().await;
        let payload = serde_json::json!({ "periodId": 353 });

        Mock::given(method("POST"))
            .and(path("/api/v1/schedules"))
            .and(header("Cookie", format!("{ACCESS_COOKIE}=acc-0").as_str()))
            .and(wiremock::matchers::body_json(payload.clone()))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/security/refresh-token"))
            .respond_with(refreshed_pair("acc-1", "ref-1"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v1/schedules"))
            .and(header("Cookie", format!("{ACCESS_COOKIE}=acc-1").as_str()))
            .and(wiremock::matchers::body_json(payload.clone()))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = gateway_for(&server, Token::new("acc-0", "ref-0")).await;
        let response =
            gateway.send(Method::POST, "api/v1/schedules", Some(payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
