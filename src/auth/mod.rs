//! Session coordination: login/logout state and the token lifecycle.
//!
//! This module provides:
//! - `SessionState` / `Credentials` / `AccessToken`: the session data model
//! - `SessionCoordinator`: the state machine that serializes token requests
//!   and drives the chat transport's login, logout, and renewal calls
//!
//! There is exactly one session per coordinator; all mutation happens under
//! a single mutex-guarded cell.

pub mod coordinator;
pub mod error;
pub mod state;

pub use coordinator::{SessionCoordinator, SessionEvent};
pub use error::SessionError;
pub use state::{AccessToken, Credentials, SessionState};
