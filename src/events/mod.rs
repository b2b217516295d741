//! Connection event handling for the chat transport.
//!
//! This module provides:
//! - `DisconnectReason`: a total mapping of transport disconnect reason
//!   codes, so new codes surface as `Other` instead of panicking or being
//!   silently swallowed
//! - `ConnectionEventSink`: the passive listener translating transport
//!   events into session coordinator calls

pub mod reason;
pub mod sink;

pub use reason::{codes, DisconnectReason};
pub use sink::ConnectionEventSink;
