//! Input validation and sanitization utilities
//!
//! This module provides utilities for validating and sanitizing user input,
//! configuration values, and API parameters.

use crate::error::CliError;
use crate::table::SortDescriptor;

/// Validate that a URL is properly formatted
pub fn validate_url(url: &str) -> crate::Result<()> {
    if url.is_empty() {
        return Err(CliError::InvalidArguments("URL cannot be empty".to_string()).into());
    }

    // Basic URL validation - must start with http:// or https://
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(CliError::InvalidArguments(format!(
            "Invalid URL '{}': URL must start with http:// or https://",
            url
        ))
        .into());
    }

    Ok(())
}

/// Validate API token format
pub fn validate_api_token(token: &str) -> crate::Result<()> {
    if token.is_empty() {
        return Err(CliError::InvalidArguments("API token cannot be empty".to_string()).into());
    }

    // Basic length check - DialDesk organization tokens are long
    if token.len() < 10 {
        return Err(CliError::InvalidArguments(
            "API token appears to be too short (minimum 10 characters)".to_string(),
        )
        .into());
    }

    Ok(())
}

/// Parse a sort specification of the form `column`, `column:asc`, or
/// `column:desc` into a sort descriptor.
pub fn parse_sort_spec(spec: &str) -> crate::Result<SortDescriptor> {
    let (column, direction) = match spec.split_once(':') {
        Some((column, direction)) => (column, direction),
        None => (spec, "asc"),
    };

    if column.is_empty() {
        return Err(
            CliError::InvalidArguments(format!("Invalid sort '{}': missing column name", spec))
                .into(),
        );
    }

    match direction {
        "asc" => Ok(SortDescriptor::asc(column)),
        "desc" => Ok(SortDescriptor::desc(column)),
        other => Err(CliError::InvalidArguments(format!(
            "Invalid sort direction '{}': expected 'asc' or 'desc'",
            other
        ))
        .into()),
    }
}

/// Parse a column filter specification of the form `column=value`.
pub fn parse_filter_spec(spec: &str) -> crate::Result<(String, String)> {
    match spec.split_once('=') {
        Some((column, value)) if !column.is_empty() => {
            Ok((column.to_string(), value.to_string()))
        }
        _ => Err(CliError::InvalidArguments(format!(
            "Invalid filter '{}': expected column=value",
            spec
        ))
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_accepts_valid_urls() {
        assert!(validate_url("http://localhost:8080").is_ok());
        assert!(validate_url("https://org.dialdesk.example.com").is_ok());
    }

    #[test]
    fn test_validate_url_rejects_invalid_urls() {
        assert!(validate_url("").is_err());
        assert!(validate_url("localhost:8080").is_err());
        assert!(validate_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_api_token() {
        assert!(validate_api_token("dd_123456789abcdef").is_ok());
        assert!(validate_api_token("").is_err());
        assert!(validate_api_token("short").is_err());
    }

    #[test]
    fn test_parse_sort_spec() {
        assert_eq!(
            parse_sort_spec("name").unwrap(),
            SortDescriptor::asc("name")
        );
        assert_eq!(
            parse_sort_spec("created_at:desc").unwrap(),
            SortDescriptor::desc("created_at")
        );
        assert!(parse_sort_spec("name:sideways").is_err());
        assert!(parse_sort_spec(":desc").is_err());
    }

    #[test]
    fn test_parse_filter_spec() {
        assert_eq!(
            parse_filter_spec("status=active").unwrap(),
            ("status".to_string(), "active".to_string())
        );
        // Empty value is allowed; it means "match the empty cell".
        assert_eq!(
            parse_filter_spec("description=").unwrap(),
            ("description".to_string(), String::new())
        );
        assert!(parse_filter_spec("no-equals-sign").is_err());
        assert!(parse_filter_spec("=value").is_err());
    }
}
