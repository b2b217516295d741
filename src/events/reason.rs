use std::fmt;

/// Disconnect reason codes emitted by the chat transport.
pub mod codes {
    pub const USER_LOGIN_ANOTHER_DEVICE: i32 = 206;
    pub const USER_REMOVED: i32 = 207;
    pub const USER_BIND_ANOTHER_DEVICE: i32 = 213;
    pub const USER_LOGIN_TOO_MANY_DEVICES: i32 = 214;
    pub const USER_KICKED_BY_CHANGE_PASSWORD: i32 = 216;
    pub const USER_KICKED_BY_OTHER_DEVICE: i32 = 217;
    pub const USER_DEVICE_CHANGED: i32 = 220;
    pub const SERVER_SERVICE_RESTRICTED: i32 = 305;
}

/// Why the transport dropped the connection.
///
/// The mapping from reason codes is total: codes this crate does not act on
/// land in `Other` rather than disappearing in a missing match arm. Only the
/// named variants are user exceptions that force a local logout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisconnectReason {
    /// The account was deleted on the server.
    AccountRemoved,
    /// The same account logged in on another device.
    LoginElsewhere,
    /// The service restricted this account.
    ServiceRestricted,
    /// Kicked because the password was changed.
    KickedByChangePassword,
    /// Kicked by a login from another device.
    KickedByOtherDevice,
    /// The account is bound to a different device.
    BoundToAnotherDevice,
    /// The device identity changed.
    DeviceChanged,
    /// Too many devices are logged in on this account.
    TooManyDevices,
    /// Any reason code this coordinator does not act on.
    Other(i32),
}

impl DisconnectReason {
    pub fn from_code(code: i32) -> Self {
        match code {
            codes::USER_REMOVED => DisconnectReason::AccountRemoved,
            codes::USER_LOGIN_ANOTHER_DEVICE => DisconnectReason::LoginElsewhere,
            codes::SERVER_SERVICE_RESTRICTED => DisconnectReason::ServiceRestricted,
            codes::USER_KICKED_BY_CHANGE_PASSWORD => DisconnectReason::KickedByChangePassword,
            codes::USER_KICKED_BY_OTHER_DEVICE => DisconnectReason::KickedByOtherDevice,
            codes::USER_BIND_ANOTHER_DEVICE => DisconnectReason::BoundToAnotherDevice,
            codes::USER_DEVICE_CHANGED => DisconnectReason::DeviceChanged,
            codes::USER_LOGIN_TOO_MANY_DEVICES => DisconnectReason::TooManyDevices,
            other => DisconnectReason::Other(other),
        }
    }

    /// Whether this reason is forwarded to the caller as a user exception.
    pub fn is_user_exception(&self) -> bool {
        !matches!(self, DisconnectReason::Other(_))
    }
}

impl fmt::Display for DisconnectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisconnectReason::AccountRemoved => f.write_str("account_removed"),
            DisconnectReason::LoginElsewhere => f.write_str("account_conflict"),
            DisconnectReason::ServiceRestricted => f.write_str("account_forbidden"),
            DisconnectReason::KickedByChangePassword => {
                f.write_str("account_kicked_by_change_password")
            }
            DisconnectReason::KickedByOtherDevice => {
                f.write_str("account_kicked_by_other_device")
            }
            DisconnectReason::BoundToAnotherDevice => f.write_str("user_bind_another_device"),
            DisconnectReason::DeviceChanged => f.write_str("user_device_changed"),
            DisconnectReason::TooManyDevices => f.write_str("user_login_too_many_devices"),
            DisconnectReason::Other(code) => write!(f, "disconnect_{code}"),
        }
    }
}
