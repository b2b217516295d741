//! The session coordinator: the login/logout state machine.
//!
//! Owns the single mutable session cell (state, last-used credentials,
//! current token) behind a mutex, and decides whether a fetched token starts
//! a fresh login or renews the live session. Concurrency control is the
//! state check done under the lock before transitioning: a second request of
//! the same purpose is rejected while one is outstanding, never queued.
//! There is no cancellation of a request once started.

use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};

use crate::api::AppServerClient;
use crate::events::DisconnectReason;
use crate::transport::ChatTransport;

use super::{AccessToken, Credentials, SessionError, SessionState};

/// Buffer size for the session event channel.
/// Session events are rare (login, logout, renewal, exceptions), so a small
/// buffer is enough; a slow consumer only delays delivery, never state.
const EVENT_CHANNEL_SIZE: usize = 32;

/// Asynchronous completions surfaced to the caller.
///
/// Delivered on the mpsc receiver returned by [`SessionCoordinator::new`].
/// Terminal failures of an attempt are also returned as errors from the
/// operation that started it; events exist for completions the caller did
/// not initiate (renewals, forced re-logins, kicks).
#[derive(Debug, Clone)]
pub enum SessionEvent {
    LoggedIn { username: String },
    LoggedOut,
    TokenRenewed,
    RenewalFailed { reason: String },
    ReloginFailed { reason: String },
    UserException(DisconnectReason),
}

/// The single shared mutable session cell.
struct SessionCell {
    state: SessionState,
    credentials: Option<Credentials>,
    token: Option<AccessToken>,
}

pub struct SessionCoordinator<T: ChatTransport> {
    cell: Mutex<SessionCell>,
    fetcher: AppServerClient,
    transport: T,
    events: mpsc::Sender<SessionEvent>,
}

impl<T: ChatTransport> SessionCoordinator<T> {
    /// Create a coordinator in the `LoggedOut` state, together with the
    /// receiver for session events.
    pub fn new(
        fetcher: AppServerClient,
        transport: T,
    ) -> (Self, mpsc::Receiver<SessionEvent>) {
        let (events, receiver) = mpsc::channel(EVENT_CHANNEL_SIZE);
        let coordinator = Self {
            cell: Mutex::new(SessionCell {
                state: SessionState::LoggedOut,
                credentials: None,
                token: None,
            }),
            fetcher,
            transport,
            events,
        };
        (coordinator, receiver)
    }

    /// Start a new login: fetch a token from the app server, then log the
    /// transport in with it.
    ///
    /// Only valid from `LoggedOut`. A login already in flight is rejected
    /// with `AlreadyLoggingIn`; an established or renewing session with
    /// `AlreadyLoggedIn`. On any failure the state reverts to `LoggedOut`
    /// and the failure is returned as the terminal result of the attempt.
    pub async fn login(&self, credentials: Credentials) -> Result<(), SessionError> {
        if !credentials.is_complete() {
            return Err(crate::api::ApiError::MissingCredentials.into());
        }

        {
            let mut cell = self.cell.lock().await;
            match cell.state {
                SessionState::LoggingIn => return Err(SessionError::AlreadyLoggingIn),
                SessionState::LoggedIn | SessionState::RenewingToken => {
                    return Err(SessionError::AlreadyLoggedIn)
                }
                SessionState::LoggedOut => cell.state = SessionState::LoggingIn,
            }
        }
        // The lock is not held across I/O; the LoggingIn state itself guards
        // against a second fetch of the same purpose.

        let token = match self.fetcher.fetch_token(&credentials).await {
            Ok(value) => AccessToken::new(value),
            Err(err) => {
                warn!(error = %err, "token fetch failed, reverting to logged out");
                self.set_logged_out().await;
                return Err(err.into());
            }
        };

        if let Err(err) = self
            .transport
            .login(&credentials.username, &token.value)
            .await
        {
            warn!(code = err.code, error = %err.message, "SDK login failed");
            self.set_logged_out().await;
            return Err(SessionError::SdkLoginFailed {
                code: err.code,
                message: err.message,
            });
        }

        let username = credentials.username.clone();
        {
            let mut cell = self.cell.lock().await;
            cell.state = SessionState::LoggedIn;
            cell.credentials = Some(credentials);
            cell.token = Some(token);
        }
        info!(%username, "logged in");
        self.emit(SessionEvent::LoggedIn { username }).await;
        Ok(())
    }

    /// Proactively renew the access token, triggered by the transport's
    /// token-will-expire signal.
    ///
    /// Only valid from `LoggedIn`. On fetch failure the session stays
    /// `LoggedIn` on the old token and no follow-up retry is scheduled
    /// before actual expiry; the failure is surfaced to the caller.
    ///
    /// A token-expired signal can force `LoggedOut` (and start a re-login)
    /// while the fetch is in flight; that transition owns the state from
    /// then on, so a completion that no longer finds `RenewingToken`
    /// discards its result instead of stomping the newer state.
    pub async fn renew(&self) -> Result<(), SessionError> {
        let credentials = {
            let mut cell = self.cell.lock().await;
            match cell.state {
                SessionState::RenewingToken => return Err(SessionError::RenewalInProgress),
                SessionState::LoggedOut | SessionState::LoggingIn => {
                    return Err(SessionError::NotLoggedIn)
                }
                SessionState::LoggedIn => {
                    let credentials = cell
                        .credentials
                        .clone()
                        .ok_or(SessionError::NoStoredCredentials)?;
                    cell.state = SessionState::RenewingToken;
                    credentials
                }
            }
        };

        match self.fetcher.fetch_token(&credentials).await {
            Ok(value) => {
                let token = AccessToken::new(value);
                {
                    let mut cell = self.cell.lock().await;
                    if cell.state != SessionState::RenewingToken {
                        debug!(state = ?cell.state, "discarding renewal completion, session was forced out mid-fetch");
                        return Ok(());
                    }
                    cell.state = SessionState::LoggedIn;
                    cell.token = Some(token.clone());
                }
                self.transport.renew_token(&token.value).await;
                info!("access token renewed");
                self.emit(SessionEvent::TokenRenewed).await;
                Ok(())
            }
            Err(err) => {
                // The transport keeps using the old token until it actually
                // expires; expiry then forces a full re-login.
                let superseded = {
                    let mut cell = self.cell.lock().await;
                    if cell.state == SessionState::RenewingToken {
                        cell.state = SessionState::LoggedIn;
                        false
                    } else {
                        true
                    }
                };
                if superseded {
                    debug!(error = %err, "renewal fetch failed after session was forced out mid-fetch");
                    return Err(err.into());
                }
                warn!(error = %err, "renewal fetch failed, keeping old token");
                self.emit(SessionEvent::RenewalFailed {
                    reason: err.to_string(),
                })
                .await;
                Err(err.into())
            }
        }
    }

    /// Forced recovery after the transport reports the token expired:
    /// transition to `LoggedOut`, then re-run the new-login flow with the
    /// last-known credentials.
    pub async fn handle_token_expired(&self) -> Result<(), SessionError> {
        let credentials = {
            let mut cell = self.cell.lock().await;
            match cell.state {
                SessionState::LoggedOut | SessionState::LoggingIn => {
                    return Err(SessionError::NotLoggedIn)
                }
                SessionState::LoggedIn | SessionState::RenewingToken => {
                    cell.state = SessionState::LoggedOut;
                    cell.token = None;
                    cell.credentials.clone()
                }
            }
        };
        self.emit(SessionEvent::LoggedOut).await;

        let credentials = credentials.ok_or(SessionError::NoStoredCredentials)?;
        info!(username = %credentials.username, "token expired, re-running login");
        if let Err(err) = self.login(credentials).await {
            self.emit(SessionEvent::ReloginFailed {
                reason: err.to_string(),
            })
            .await;
            return Err(err);
        }
        Ok(())
    }

    /// Explicit sign-out: the SDK flushes pending work before disconnecting.
    ///
    /// Rejected with `OperationInFlight` while a login or renewal is
    /// outstanding; there is no cancellation of in-flight requests.
    pub async fn logout(&self) -> Result<(), SessionError> {
        {
            let cell = self.cell.lock().await;
            match cell.state {
                SessionState::LoggedOut => return Err(SessionError::NotLoggedIn),
                SessionState::LoggingIn | SessionState::RenewingToken => {
                    return Err(SessionError::OperationInFlight)
                }
                SessionState::LoggedIn => {}
            }
        }

        self.transport
            .logout(true)
            .await
            .map_err(|err| SessionError::SdkLogoutFailed {
                code: err.code,
                message: err.message,
            })?;

        self.clear_session().await;
        info!("logged out");
        self.emit(SessionEvent::LoggedOut).await;
        Ok(())
    }

    /// Local teardown after the server already invalidated this session
    /// (account removed, kicked, etc.): SDK logout without flushing and
    /// without contacting the app server. Local state is cleared even if
    /// the SDK call fails.
    pub async fn local_logout(&self) -> Result<(), SessionError> {
        let result = self.transport.logout(false).await;
        self.clear_session().await;
        self.emit(SessionEvent::LoggedOut).await;
        result.map_err(|err| SessionError::SdkLogoutFailed {
            code: err.code,
            message: err.message,
        })
    }

    /// Register a new account with the app server. Does not touch the
    /// session state.
    pub async fn register(&self, credentials: &Credentials) -> Result<(), SessionError> {
        self.fetcher.register(credentials).await?;
        info!(username = %credentials.username, "account registered");
        Ok(())
    }

    pub async fn state(&self) -> SessionState {
        self.cell.lock().await.state
    }

    /// Value of the currently installed access token, if logged in.
    pub async fn current_token(&self) -> Option<String> {
        self.cell
            .lock()
            .await
            .token
            .as_ref()
            .map(|t| t.value.clone())
    }

    pub(crate) async fn emit_user_exception(&self, reason: DisconnectReason) {
        self.emit(SessionEvent::UserException(reason)).await;
    }

    async fn set_logged_out(&self) {
        self.cell.lock().await.state = SessionState::LoggedOut;
    }

    async fn clear_session(&self) {
        let mut cell = self.cell.lock().await;
        cell.state = SessionState::LoggedOut;
        cell.credentials = None;
        cell.token = None;
    }

    async fn emit(&self, event: SessionEvent) {
        // A dropped receiver means the caller stopped listening; state
        // transitions must not depend on event delivery.
        let _ = self.events.send(event).await;
    }
}
