use chrono::{DateTime, Duration, Utc};

/// Username/password pair sent to the app server.
///
/// Held in memory for the duration of an attempt (plus automatic re-login
/// after token expiry) and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both fields non-empty. Incomplete credentials never reach the network.
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

/// Opaque access token issued by the app server.
///
/// The coordinator does not parse or validate the token's internal
/// structure; only the transport interprets it.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub value: String,
    pub obtained_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            obtained_at: Utc::now(),
        }
    }

    /// How long ago this token was fetched (for logging/diagnostics).
    pub fn age(&self) -> Duration {
        Utc::now() - self.obtained_at
    }
}

/// Current phase of the session state machine.
///
/// `LoggingIn` and `RenewingToken` double as the in-flight markers: a second
/// request of the same purpose is rejected while one is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggingIn,
    LoggedIn,
    RenewingToken,
}
