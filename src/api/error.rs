use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("username or password is empty")]
    MissingCredentials,

    #[error("server rejected request with status {status}: {body}")]
    ServerRejected { status: u16, body: String },

    #[error("server returned 200 with an empty body")]
    EmptyResponse,

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("registration rejected: {0}")]
    RegistrationRejected(String),

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            format!(
                "{}... (truncated, {} total bytes)",
                &body[..MAX_ERROR_BODY_LENGTH],
                body.len()
            )
        }
    }

    pub(crate) fn rejected(status: reqwest::StatusCode, body: &str) -> Self {
        ApiError::ServerRejected {
            status: status.as_u16(),
            body: Self::truncate_body(body),
        }
    }

    /// HTTP status carried by a `ServerRejected` error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::ServerRejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}
