//! Seam to the external chat SDK.
//!
//! The transport handles connection management, message delivery, and group
//! membership. This crate only drives its authentication surface: login with
//! a token, logout, and proactive token renewal. Expressing that surface as
//! a trait lets tests substitute a mock and keeps the coordinator decoupled
//! from any concrete SDK binding.

use std::fmt;
use std::future::Future;

/// Error reported by the chat SDK, carried verbatim (code + message).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkError {
    pub code: i32,
    pub message: String,
}

impl SdkError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for SdkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "code {}: {}", self.code, self.message)
    }
}

impl std::error::Error for SdkError {}

/// Authentication surface of the chat SDK.
///
/// `Send + Sync + 'static` so the coordinator can be shared across tasks.
/// Callback-style SDK APIs (onSuccess/onError) map to the async `Result`s
/// here; delivery stays on the SDK's own threads.
pub trait ChatTransport: Send + Sync + 'static {
    /// Log in to the chat service with a username and an access token.
    fn login(
        &self,
        username: &str,
        token: &str,
    ) -> impl Future<Output = Result<(), SdkError>> + Send;

    /// Log out. `flush_pending` asks the SDK to deliver queued messages
    /// and unbind push tokens before tearing the connection down.
    fn logout(&self, flush_pending: bool) -> impl Future<Output = Result<(), SdkError>> + Send;

    /// Hand a freshly fetched token to the live connection. The SDK applies
    /// it in the background and reports nothing back, so this is
    /// fire-and-forget.
    fn renew_token(&self, token: &str) -> impl Future<Output = ()> + Send;
}
