use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
    #[error("ApiError: {0}")]
    Api(#[from] ApiError),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("AuthError: {0}")]
    Auth(#[from] AuthError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
    #[error("DisplayError: {0}")]
    Display(#[from] DisplayError),
    #[error("UtilsError: {0}")]
    Utils(#[from] UtilsError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Authentication required")]
    AuthRequired { message: String, hint: String },
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64, endpoint: String },
    #[error("HTTP error: {status} {message}")]
    Http {
        status: u16,
        endpoint: String,
        message: String,
    },
    #[error("Authentication failed")]
    Unauthorized {
        status: u16,
        endpoint: String,
        server_message: String,
    },
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Login failed: API token was rejected by the server")]
    TokenRejected,
    #[error("Not logged in")]
    NotLoggedIn,
    #[error("Stored API token is no longer valid")]
    TokenInvalid,
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Keyring error: {0}")]
    KeyringError(String),
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration save failed")]
    ConfigSaveFailed,
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
}

#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("Terminal output error: {0}")]
    TerminalOutput(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Profile '{name}' not found")]
    UnknownProfile { name: String },
    #[error("Invalid configuration value for '{field}': {value}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum UtilsError {
    #[error("Validation error: {message}")]
    Validation { message: String },
    #[error("Input processing error: {message}")]
    InputProcessing { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            ErrorSeverity::Critical => "🚨",
            ErrorSeverity::High => "❌",
            ErrorSeverity::Medium => "⚠️",
            ErrorSeverity::Low => "ℹ️",
        }
    }
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Cli(_) => ErrorSeverity::Medium,
            AppError::Api(api_error) => match api_error {
                ApiError::Unauthorized { .. } => ErrorSeverity::High,
                ApiError::Timeout { .. } => ErrorSeverity::Medium,
                ApiError::Http { status, .. } if *status >= 500 => ErrorSeverity::High,
                _ => ErrorSeverity::Medium,
            },
            AppError::Config(_) => ErrorSeverity::High,
            AppError::Auth(_) => ErrorSeverity::High,
            AppError::Storage(_) => ErrorSeverity::Medium,
            AppError::Display(_) => ErrorSeverity::Low,
            AppError::Utils(_) => ErrorSeverity::Low,
        }
    }

    pub fn display_friendly(&self) -> String {
        match self {
            AppError::Auth(AuthError::TokenRejected) => {
                "API token was rejected by the server".to_string()
            }
            AppError::Auth(AuthError::NotLoggedIn) => "Not logged in".to_string(),
            AppError::Config(ConfigError::UnknownProfile { name }) => {
                format!("Profile '{}' not found", name)
            }
            _ => format!("{}", self),
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Auth(AuthError::TokenRejected | AuthError::TokenInvalid) => {
                Some("'dialdesk auth login' to store a fresh API token".to_string())
            }
            AppError::Auth(AuthError::NotLoggedIn) => {
                Some("'dialdesk auth login' or set DIALDESK_API_TOKEN".to_string())
            }
            AppError::Api(ApiError::Timeout { .. }) => {
                Some("Check your internet or DialDesk connection and try again".to_string())
            }
            AppError::Api(ApiError::Unauthorized { .. }) => {
                Some("'dialdesk auth status' to inspect the active credentials".to_string())
            }
            AppError::Config(ConfigError::UnknownProfile { .. }) => {
                Some("'dialdesk config show' to list configured profiles".to_string())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_display() {
        let cli_err = CliError::InvalidArguments("missing --name".to_string());
        assert_eq!(format!("{}", cli_err), "Invalid arguments: missing --name");

        let cli_err = CliError::AuthRequired {
            message: "message".to_string(),
            hint: "hint".to_string(),
        };
        assert!(matches!(cli_err, CliError::AuthRequired { .. }));
    }

    #[test]
    fn test_api_error_display() {
        let api_err = ApiError::Http {
            status: 404,
            endpoint: "/api/v1/agents/99".to_string(),
            message: "not found".to_string(),
        };
        assert_eq!(format!("{}", api_err), "HTTP error: 404 not found");

        let api_err = ApiError::Timeout {
            timeout_secs: 30,
            endpoint: "/api/v1/agents".to_string(),
        };
        assert_eq!(format!("{}", api_err), "Request timed out after 30s");
    }

    #[test]
    fn test_app_error_severity() {
        let app_err = AppError::Api(ApiError::Unauthorized {
            status: 401,
            endpoint: "/api/v1/me".to_string(),
            server_message: "invalid token".to_string(),
        });
        assert_eq!(app_err.severity(), ErrorSeverity::High);

        let app_err = AppError::Api(ApiError::Http {
            status: 503,
            endpoint: "/api/v1/agents".to_string(),
            message: "service unavailable".to_string(),
        });
        assert_eq!(app_err.severity(), ErrorSeverity::High);

        let app_err = AppError::Utils(UtilsError::Validation {
            message: "bad sort spec".to_string(),
        });
        assert_eq!(app_err.severity(), ErrorSeverity::Low);
    }

    #[test]
    fn test_troubleshooting_hints() {
        let app_err = AppError::Auth(AuthError::TokenRejected);
        assert!(
            app_err
                .troubleshooting_hint()
                .is_some_and(|hint| hint.contains("auth login"))
        );

        let app_err = AppError::Display(DisplayError::TerminalOutput("broken pipe".to_string()));
        assert!(app_err.troubleshooting_hint().is_none());
    }

    #[test]
    fn test_display_friendly_falls_back_to_display() {
        let app_err = AppError::Storage(StorageError::ConfigSaveFailed);
        assert_eq!(
            app_err.display_friendly(),
            "StorageError: Configuration save failed"
        );
    }
}
