//! HTTP client for the app server that issues chat access tokens.
//!
//! Two endpoints, both POST with the same JSON body shape:
//! - login: returns `{"accessToken": "..."}` on success
//! - register: returns `{"code": "RES_OK"}` on success, or an `errorInfo`
//!   message on failure
//!
//! Success requires status 200 AND a non-empty, parsable body with the
//! expected field; anything else is a failure, never a partial success.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::Credentials;
use crate::config::Config;

use super::ApiError;

/// Registration result code the app server uses for success
const REGISTER_OK_CODE: &str = "RES_OK";

#[derive(Serialize)]
struct CredentialsBody<'a> {
    #[serde(rename = "userAccount")]
    user_account: &'a str,
    #[serde(rename = "userPassword")]
    user_password: &'a str,
}

#[derive(Deserialize)]
struct TokenBody {
    #[serde(rename = "accessToken")]
    access_token: Option<String>,
}

#[derive(Deserialize)]
struct RegisterBody {
    code: Option<String>,
    #[serde(rename = "errorInfo")]
    error_info: Option<String>,
}

/// Client for the app-server token and registration endpoints.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct AppServerClient {
    client: Client,
    login_url: String,
    register_url: String,
}

impl AppServerClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            login_url: config.login_url.clone(),
            register_url: config.register_url.clone(),
        })
    }

    /// Exchange credentials for an access token.
    ///
    /// Fails fast with `MissingCredentials` before any network I/O if the
    /// username or password is empty. Never retries.
    pub async fn fetch_token(&self, credentials: &Credentials) -> Result<String, ApiError> {
        if !credentials.is_complete() {
            return Err(ApiError::MissingCredentials);
        }

        debug!(url = %self.login_url, "requesting access token from app server");
        let body = self.post_credentials(&self.login_url, credentials).await?;
        parse_token_body(&body)
    }

    /// Register a new account with the app server.
    pub async fn register(&self, credentials: &Credentials) -> Result<(), ApiError> {
        if !credentials.is_complete() {
            return Err(ApiError::MissingCredentials);
        }

        debug!(url = %self.register_url, "registering account with app server");
        let body = self
            .post_credentials(&self.register_url, credentials)
            .await?;
        parse_register_body(&body)
    }

    /// POST the credential body and return the response text, rejecting
    /// non-200 statuses. Both endpoints share this shape.
    async fn post_credentials(
        &self,
        url: &str,
        credentials: &Credentials,
    ) -> Result<String, ApiError> {
        let response = self
            .client
            .post(url)
            .json(&CredentialsBody {
                user_account: &credentials.username,
                user_password: &credentials.password,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if status != StatusCode::OK {
            return Err(ApiError::rejected(status, &body));
        }
        Ok(body)
    }
}

fn parse_token_body(body: &str) -> Result<String, ApiError> {
    if body.is_empty() {
        return Err(ApiError::EmptyResponse);
    }
    let parsed: TokenBody =
        serde_json::from_str(body).map_err(|e| ApiError::MalformedResponse(e.to_string()))?;
    match parsed.access_token {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(ApiError::MalformedResponse(
            "accessToken field missing or empty".to_string(),
        )),
    }
}

fn parse_register_body(body: &str) -> Result<(), ApiError> {
    if body.is_empty() {
        return Err(ApiError::EmptyResponse);
    }
    let parsed: RegisterBody =
        serde_json::from_str(body).map_err(|e| ApiError::MalformedResponse(e.to_string()))?;
    match parsed.code.as_deref() {
        Some(REGISTER_OK_CODE) => Ok(()),
        Some(_) => Err(ApiError::RegistrationRejected(
            parsed
                .error_info
                .unwrap_or_else(|| "no errorInfo in response".to_string()),
        )),
        None => Err(ApiError::MalformedResponse(
            "code field missing".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_body_extracts_token() {
        let token = parse_token_body(r#"{"accessToken":"abc123","expireTimestamp":99}"#).unwrap();
        assert_eq!(token, "abc123");
    }

    #[test]
    fn test_parse_token_body_empty_body_fails() {
        assert!(matches!(parse_token_body(""), Err(ApiError::EmptyResponse)));
    }

    #[test]
    fn test_parse_token_body_unparsable_fails() {
        assert!(matches!(
            parse_token_body("not json"),
            Err(ApiError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_token_body_missing_field_fails() {
        assert!(matches!(
            parse_token_body(r#"{"something":"else"}"#),
            Err(ApiError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_token_body_empty_token_fails() {
        assert!(matches!(
            parse_token_body(r#"{"accessToken":""}"#),
            Err(ApiError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_register_body_res_ok_succeeds() {
        assert!(parse_register_body(r#"{"code":"RES_OK"}"#).is_ok());
    }

    #[test]
    fn test_parse_register_body_error_carries_error_info() {
        let err = parse_register_body(r#"{"code":"ERR","errorInfo":"exists"}"#).unwrap_err();
        match err {
            ApiError::RegistrationRejected(message) => assert_eq!(message, "exists"),
            other => panic!("expected RegistrationRejected, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_register_body_missing_code_fails() {
        assert!(matches!(
            parse_register_body(r#"{"errorInfo":"huh"}"#),
            Err(ApiError::MalformedResponse(_))
        ));
    }
}
