//! Session authentication for chat transports.
//!
//! This crate owns the credential/token lifecycle that sits between an app
//! server issuing short-lived access tokens and a chat SDK consuming them:
//!
//! - [`AppServerClient`]: exchanges username/password for an access token
//!   (and registers new accounts) over HTTPS.
//! - [`SessionCoordinator`]: the login/logout state machine. It decides when
//!   a fetched token starts a fresh login versus renews an existing session,
//!   and rejects duplicate in-flight requests of the same purpose.
//! - [`ConnectionEventSink`]: translates asynchronous transport events
//!   (disconnect reasons, token-expiry warnings) into coordinator calls.
//!
//! The chat transport itself is an external collaborator, abstracted behind
//! the [`ChatTransport`] trait. Message delivery, presence, and group
//! membership stay on the SDK side; this crate never reimplements them.

pub mod api;
pub mod auth;
pub mod config;
pub mod events;
pub mod transport;

pub use api::{ApiError, AppServerClient};
pub use auth::{
    AccessToken, Credentials, SessionCoordinator, SessionError, SessionEvent, SessionState,
};
pub use config::Config;
pub use events::{ConnectionEventSink, DisconnectReason};
pub use transport::{ChatTransport, SdkError};
