//! ICS REST API client.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::models::Envelope;
use super::traits::{ApiError, CredentialProvider};

/// Base URL for the ICS REST API.
pub const API_BASE_URL: &str = "https://api.ingenuitycloudservices.com/rest-api";

/// Timeout for list and lookup calls.
pub const LIST_TIMEOUT_SECS: u64 = 30;

/// Timeout for mutating calls and heavier listings.
pub const ACTION_TIMEOUT_SECS: u64 = 60;

/// Timeout for credential verification.
pub const AUTH_TIMEOUT_SECS: u64 = 10;

/// Header carrying the API token.
const API_TOKEN_HEADER: &str = "X-Api-Token";

/// Authenticated client for the ICS API.
///
/// Performs exactly one HTTP request per call: no retries, no logging.
#[derive(Clone)]
pub struct ApiClient {
    /// HTTP client.
    client: Client,
    /// Base URL without trailing slash.
    base_url: String,
    /// Source of the API token, consulted on every request.
    credentials: Arc<dyn CredentialProvider>,
}

impl ApiClient {
    /// Create a client against the production API.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(credentials: impl CredentialProvider + 'static) -> Result<Self, ApiError> {
        Self::with_base_url(API_BASE_URL, credentials)
    }

    /// Create a client against an arbitrary base URL.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn with_base_url(
        base_url: impl Into<String>,
        credentials: impl CredentialProvider + 'static,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!("ics-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials: Arc::new(credentials),
        })
    }

    /// Issue one authenticated request and decode the envelope's `data`.
    ///
    /// # Errors
    /// - [`ApiError::Unauthenticated`] when no token is available (nothing is sent)
    /// - [`ApiError::Transport`] on connection failure or timeout
    /// - [`ApiError::InvalidCredentials`] on 401
    /// - [`ApiError::NotFound`] on 404, naming `path`
    /// - [`ApiError::UnexpectedStatus`] on any other non-2xx
    /// - [`ApiError::MalformedResponse`] when a 2xx body does not decode into `T`
    pub async fn request<T, B>(
        &self,
        method: Method,
        timeout_secs: u64,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let token = self.token()?;
        let url = format!("{}{path}", self.base_url);

        let mut request = self
            .client
            .request(method, &url)
            .header(API_TOKEN_HEADER, token)
            .timeout(Duration::from_secs(timeout_secs));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        Self::handle_response(path, response).await
    }

    /// Authenticated GET.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        timeout_secs: u64,
        path: &str,
    ) -> Result<T, ApiError> {
        self.request::<T, ()>(Method::GET, timeout_secs, path, None)
            .await
    }

    /// Authenticated POST without a body.
    pub(crate) async fn post_empty<T: DeserializeOwned>(
        &self,
        timeout_secs: u64,
        path: &str,
    ) -> Result<T, ApiError> {
        self.request::<T, ()>(Method::POST, timeout_secs, path, None)
            .await
    }

    /// Authenticated request with a JSON body.
    pub(crate) async fn send_json<T, B>(
        &self,
        method: Method,
        timeout_secs: u64,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(method, timeout_secs, path, Some(body)).await
    }

    /// Authenticated DELETE.
    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        timeout_secs: u64,
        path: &str,
    ) -> Result<T, ApiError> {
        self.request::<T, ()>(Method::DELETE, timeout_secs, path, None)
            .await
    }

    fn token(&self) -> Result<String, ApiError> {
        match self.credentials.api_token() {
            Some(token) if !token.trim().is_empty() => Ok(token),
            _ => Err(ApiError::Unauthenticated),
        }
    }

    /// Map the status code, then decode the envelope.
    async fn handle_response<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::InvalidCredentials);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::not_found(path));
        }
        if !status.is_success() {
            return Err(ApiError::UnexpectedStatus {
                code: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let envelope: Envelope<T> =
            serde_json::from_slice(&body).map_err(ApiError::MalformedResponse)?;
        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::models::{ActionResult, Server};
    use crate::api::StaticToken;

    struct LoggedOut;

    impl CredentialProvider for LoggedOut {
        fn api_token(&self) -> Option<String> {
            None
        }
    }

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::with_base_url(server.uri(), StaticToken::new("test-token")).unwrap()
    }

    #[tokio::test]
    async fn test_sends_token_and_decodes_envelope() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/servers"))
            .and(header("X-Api-Token", "test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "statusCode": 200,
                "message": "Success",
                "data": [{"id": "srv-1", "service_id": 100, "hostname": "web-1"}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let servers: Vec<Server> = client_for(&mock_server)
            .get(LIST_TIMEOUT_SECS, "/servers")
            .await
            .unwrap();
        assert_eq!(servers.len(), 1);
        assert_eq!(servers[0].hostname, "web-1");
    }

    #[tokio::test]
    async fn test_missing_token_sends_nothing() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = ApiClient::with_base_url(mock_server.uri(), LoggedOut).unwrap();
        let result: Result<Vec<Server>, _> = client.get(LIST_TIMEOUT_SECS, "/servers").await;
        assert!(matches!(result, Err(ApiError::Unauthenticated)));

        let client = ApiClient::with_base_url(mock_server.uri(), StaticToken::new("")).unwrap();
        let result: Result<Vec<Server>, _> = client.get(LIST_TIMEOUT_SECS, "/servers").await;
        assert!(matches!(result, Err(ApiError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_status_code_mapping() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/unauthorized"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        let result: Result<ActionResult, _> = client.get(LIST_TIMEOUT_SECS, "/unauthorized").await;
        assert!(matches!(result, Err(ApiError::InvalidCredentials)));

        let result: Result<ActionResult, _> = client.get(LIST_TIMEOUT_SECS, "/missing").await;
        match result {
            Err(ApiError::NotFound { resource }) => assert_eq!(resource, "/missing"),
            other => panic!("expected NotFound, got {other:?}"),
        }

        let result: Result<ActionResult, _> = client.get(LIST_TIMEOUT_SECS, "/broken").await;
        assert!(matches!(
            result,
            Err(ApiError::UnexpectedStatus { code: 503 })
        ));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/servers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "statusCode": 200,
                "message": "Success",
                "data": {"unexpected": "object"}
            })))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/garbage"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        let result: Result<Vec<Server>, _> = client.get(LIST_TIMEOUT_SECS, "/servers").await;
        assert!(matches!(result, Err(ApiError::MalformedResponse(_))));

        let result: Result<Vec<Server>, _> = client.get(LIST_TIMEOUT_SECS, "/garbage").await;
        assert!(matches!(result, Err(ApiError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_timeout_is_transport_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"data": {"success": true}}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&mock_server)
            .await;

        let result: Result<ActionResult, _> = client_for(&mock_server).get(1, "/slow").await;
        assert!(matches!(result, Err(ApiError::Transport(_))));
    }

    #[tokio::test]
    async fn test_json_body_is_sent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/servers/srv-1/friendly-name"))
            .and(body_json(json!({"friendly_name": "db-primary"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "statusCode": 200,
                "message": "Success",
                "data": {"success": true}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result: ActionResult = client_for(&mock_server)
            .send_json(
                Method::PUT,
                ACTION_TIMEOUT_SECS,
                "/servers/srv-1/friendly-name",
                &json!({"friendly_name": "db-primary"}),
            )
            .await
            .unwrap();
        assert!(result.success);
    }
}
