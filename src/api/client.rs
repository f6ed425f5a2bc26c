use crate::error::ApiError;
use reqwest::{Client, Method, RequestBuilder, Response};
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("dialdesk/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the DialDesk organization API.
///
/// Authentication is bearer-token based. A token provided via environment or
/// flag (`api_token`) takes precedence over the keyring-stored session token.
#[derive(Debug, Clone)]
pub struct OrgClient {
    client: Client,
    pub base_url: String,
    pub session_token: Option<String>,
    pub api_token: Option<String>,
}

impl OrgClient {
    pub fn new(base_url: String) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Http {
                status: 0,
                endpoint: "client_init".to_string(),
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(OrgClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session_token: None,
            api_token: None,
        })
    }

    pub fn with_api_token(base_url: String, api_token: String) -> Result<Self, ApiError> {
        let mut client = OrgClient::new(base_url)?;
        client.api_token = Some(api_token);
        Ok(client)
    }

    pub fn set_session_token(&mut self, token: String) {
        self.session_token = Some(token);
    }

    pub fn is_authenticated(&self) -> bool {
        self.api_token.is_some() || self.session_token.is_some()
    }

    fn bearer_token(&self) -> Option<&str> {
        self.api_token.as_deref().or(self.session_token.as_deref())
    }

    pub fn build_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method, url);

        if let Some(token) = self.bearer_token() {
            request = request.bearer_auth(token);
        }

        request
    }

    /// Sends a request, mapping transport failures into the API error
    /// taxonomy. No retries; errors pass straight through to the caller.
    pub async fn execute(
        &self,
        request: RequestBuilder,
        endpoint: &str,
    ) -> Result<Response, ApiError> {
        request.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout {
                    timeout_secs: DEFAULT_TIMEOUT_SECS,
                    endpoint: endpoint.to_string(),
                }
            } else {
                ApiError::Http {
                    status: 0,
                    endpoint: endpoint.to_string(),
                    message: format!("Request failed: {}", e),
                }
            }
        })
    }

    pub async fn handle_response<T>(
        &self,
        response: Response,
        endpoint: &str,
    ) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();

        if status.is_success() {
            response.json::<T>().await.map_err(|e| ApiError::Http {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
                message: format!("Failed to parse response: {}", e),
            })
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            match status.as_u16() {
                401 | 403 => Err(ApiError::Unauthorized {
                    status: status.as_u16(),
                    endpoint: endpoint.to_string(),
                    server_message: error_text,
                }),
                408 | 504 => Err(ApiError::Timeout {
                    timeout_secs: DEFAULT_TIMEOUT_SECS,
                    endpoint: endpoint.to_string(),
                }),
                _ => Err(ApiError::Http {
                    status: status.as_u16(),
                    endpoint: endpoint.to_string(),
                    message: error_text,
                }),
            }
        }
    }

    /// Checks a response status without consuming a body (DELETE endpoints
    /// return 204).
    pub async fn expect_success(
        &self,
        response: Response,
        endpoint: &str,
    ) -> Result<(), ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        match status.as_u16() {
            401 | 403 => Err(ApiError::Unauthorized {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
                server_message: error_text,
            }),
            _ => Err(ApiError::Http {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
                message: error_text,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{Agent, ListEnvelope};
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_creation_trims_trailing_slash() {
        let client = OrgClient::new("http://example.test/".to_string()).unwrap();
        assert_eq!(client.base_url, "http://example.test");
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_api_token_takes_precedence_over_session() {
        let mut client =
            OrgClient::with_api_token("http://example.test".to_string(), "env-token".to_string())
                .unwrap();
        client.set_session_token("stored-token".to_string());
        assert!(client.is_authenticated());
        assert_eq!(client.bearer_token(), Some("env-token"));
    }

    #[tokio::test]
    async fn test_bearer_header_and_envelope_parsing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/agents"))
            .and(header("authorization", "Bearer secret-token"))
            .and(query_param("limit", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    {
                        "id": 1,
                        "name": "Receptionist",
                        "status": "active",
                        "created_at": "2024-05-01T12:00:00Z",
                        "updated_at": "2024-05-02T08:30:00Z"
                    }
                ],
                "meta": { "limit": 2, "offset": 0, "total": 7 }
            })))
            .mount(&server)
            .await;

        let client =
            OrgClient::with_api_token(server.uri(), "secret-token".to_string()).unwrap();
        let request = client
            .build_request(Method::GET, "/api/v1/agents")
            .query(&[("limit", "2")]);
        let response = client.execute(request, "/api/v1/agents").await.unwrap();
        let envelope: ListEnvelope<Agent> = client
            .handle_response(response, "/api/v1/agents")
            .await
            .unwrap();

        assert_eq!(envelope.data.len(), 1);
        assert_eq!(envelope.data[0].name, "Receptionist");
        let meta = envelope.meta.unwrap();
        assert_eq!(meta.total, 7);
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_unauthorized_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/me"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
            .mount(&server)
            .await;

        let client = OrgClient::new(server.uri()).unwrap();
        let request = client.build_request(Method::GET, "/api/v1/me");
        let response = client.execute(request, "/api/v1/me").await.unwrap();
        let result: Result<serde_json::Value, ApiError> =
            client.handle_response(response, "/api/v1/me").await;

        match result {
            Err(ApiError::Unauthorized {
                status,
                server_message,
                ..
            }) => {
                assert_eq!(status, 401);
                assert_eq!(server_message, "invalid token");
            }
            other => panic!("Expected Unauthorized, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_server_error_maps_to_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1/agents/3"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = OrgClient::new(server.uri()).unwrap();
        let request = client.build_request(Method::DELETE, "/api/v1/agents/3");
        let response = client.execute(request, "/api/v1/agents/3").await.unwrap();
        let result = client.expect_success(response, "/api/v1/agents/3").await;

        match result {
            Err(ApiError::Http { status, message, .. }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("Expected Http error, got {:?}", other),
        }
    }
}
