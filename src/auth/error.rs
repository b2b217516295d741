use thiserror::Error;

use crate::api::ApiError;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("a login is already in flight")]
    AlreadyLoggingIn,

    #[error("already logged in")]
    AlreadyLoggedIn,

    #[error("a token renewal is already in flight")]
    RenewalInProgress,

    #[error("not logged in")]
    NotLoggedIn,

    #[error("cannot log out while a login or renewal is in flight")]
    OperationInFlight,

    #[error("no stored credentials for automatic re-login")]
    NoStoredCredentials,

    #[error("SDK login failed: code {code}: {message}")]
    SdkLoginFailed { code: i32, message: String },

    #[error("SDK logout failed: code {code}: {message}")]
    SdkLogoutFailed { code: i32, message: String },

    #[error(transparent)]
    Api(#[from] ApiError),
}
