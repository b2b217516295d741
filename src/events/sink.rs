//! Passive listener translating transport connection events into session
//! coordinator calls.
//!
//! The transport invokes these hooks from its own event loop; none of them
//! block, and failures are surfaced through the coordinator's event channel
//! rather than propagated back into the transport.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::auth::SessionCoordinator;
use crate::transport::ChatTransport;

use super::DisconnectReason;

pub struct ConnectionEventSink<T: ChatTransport> {
    coordinator: Arc<SessionCoordinator<T>>,
}

impl<T: ChatTransport> ConnectionEventSink<T> {
    pub fn new(coordinator: Arc<SessionCoordinator<T>>) -> Self {
        Self { coordinator }
    }

    /// No-op hook, exposed so callers can route every transport event
    /// through the sink.
    pub async fn on_connected(&self) {}

    /// Classify the disconnect reason. Known user exceptions are forwarded
    /// to the caller exactly once and followed by a local logout; codes the
    /// coordinator does not act on are logged and dropped.
    pub async fn on_disconnected(&self, code: i32) {
        let reason = DisconnectReason::from_code(code);
        if !reason.is_user_exception() {
            debug!(code, "disconnect reason not mapped to a user exception");
            return;
        }

        warn!(%reason, "user exception from transport");
        self.coordinator.emit_user_exception(reason).await;
        if let Err(err) = self.coordinator.local_logout().await {
            warn!(error = %err, "local logout after user exception failed");
        }
    }

    /// The token is about to expire: fetch a fresh one and hand it to the
    /// transport's renewal call.
    pub async fn on_token_will_expire(&self) {
        debug!("transport signalled token will expire");
        if let Err(err) = self.coordinator.renew().await {
            warn!(error = %err, "token renewal failed");
        }
    }

    /// The token already expired: forced logout, then automatic re-login
    /// with the last-known credentials.
    pub async fn on_token_expired(&self) {
        info!("transport signalled token expired");
        if let Err(err) = self.coordinator.handle_token_expired().await {
            warn!(error = %err, "automatic re-login after token expiry failed");
        }
    }
}
