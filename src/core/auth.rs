use crate::api::client::OrgClient;
use crate::api::models::SessionUser;
use crate::error::{ApiError, AppError, AuthError, CliError};
use crate::utils::validation::validate_api_token;
use reqwest::Method;
use rpassword::read_password;
use std::io::{self, Write};

/// API token input handler for `auth login`.
pub struct TokenInput {
    pub token: String,
}

impl TokenInput {
    /// Collect the token from the argument when given, otherwise prompt for
    /// it without echoing.
    pub fn from_arg_or_prompt(token: Option<String>) -> Result<Self, AppError> {
        let token = match token {
            Some(token) => token,
            None => {
                print!("API token: ");
                io::stdout().flush().map_err(|e| {
                    AppError::Cli(CliError::InvalidArguments(format!(
                        "Failed to flush stdout: {}",
                        e
                    )))
                })?;

                read_password().map_err(|e| {
                    AppError::Cli(CliError::InvalidArguments(format!(
                        "Failed to read token: {}",
                        e
                    )))
                })?
            }
        };

        Ok(Self {
            token: token.trim().to_string(),
        })
    }

    pub fn validate(&self) -> Result<(), AppError> {
        validate_api_token(&self.token)
    }
}

/// Verifies the client's token against the organization API and returns the
/// authenticated principal. A 401/403 becomes [`AuthError::TokenRejected`].
pub async fn verify_token(client: &OrgClient) -> Result<SessionUser, AppError> {
    let request = client.build_request(Method::GET, "/api/v1/me");
    let response = client.execute(request, "/api/v1/me").await?;
    match client
        .handle_response::<SessionUser>(response, "/api/v1/me")
        .await
    {
        Ok(user) => Ok(user),
        Err(ApiError::Unauthorized { .. }) => Err(AuthError::TokenRejected.into()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_token_input_from_arg_trims_whitespace() {
        let input = TokenInput::from_arg_or_prompt(Some("  dd_token_123456  \n".to_string()))
            .expect("arg input never prompts");
        assert_eq!(input.token, "dd_token_123456");
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_token_input_rejects_short_token() {
        let input = TokenInput::from_arg_or_prompt(Some("short".to_string())).unwrap();
        assert!(input.validate().is_err());
    }

    #[tokio::test]
    async fn test_verify_token_returns_principal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/me"))
            .and(header("authorization", "Bearer dd_token_123456"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 3,
                "name": "Maria Santos",
                "email": "maria@example.com",
                "role": "admin"
            })))
            .mount(&server)
            .await;

        let client =
            OrgClient::with_api_token(server.uri(), "dd_token_123456".to_string()).unwrap();
        let user = verify_token(&client).await.unwrap();
        assert_eq!(user.name, "Maria Santos");
    }

    #[tokio::test]
    async fn test_verify_token_maps_unauthorized_to_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/me"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
            .mount(&server)
            .await;

        let client = OrgClient::with_api_token(server.uri(), "bad-token-value".to_string()).unwrap();
        let result = verify_token(&client).await;
        assert!(matches!(
            result,
            Err(AppError::Auth(AuthError::TokenRejected))
        ));
    }
}
