//! HTTP client module for the app server issuing chat access tokens.
//!
//! This module provides the `AppServerClient` for exchanging credentials
//! for a short-lived access token and for registering new accounts.
//!
//! The fetcher never retries on its own; failures propagate to the
//! session coordinator, which decides what to surface to the caller.

pub mod client;
pub mod error;

pub use client::AppServerClient;
pub use error::ApiError;
