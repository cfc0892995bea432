//! Error codes for the HRIS client
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication / session errors
//! - 2xxx: Permission errors
//! - 3xxx: Device errors (camera, geolocation)
//! - 4xxx: Master data errors
//! - 5xxx: Submission errors
//! - 9xxx: System / transport errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code enum
///
/// Represented as u16 on the wire so the front end can switch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// No session is stored
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Stored session could not be read
    SessionCorrupted = 1005,

    // ==================== 2xxx: Permission ====================
    /// Permission denied by the server
    PermissionDenied = 2001,
    /// Role string not recognized
    UnknownRole = 2002,

    // ==================== 3xxx: Device ====================
    /// Camera or location permission denied
    DevicePermissionDenied = 3001,
    /// Device not available
    DeviceUnavailable = 3002,
    /// Capture already finished; remount to capture again
    CaptureLocked = 3003,
    /// Captured frame could not be encoded
    ImageEncodingFailed = 3004,

    // ==================== 4xxx: Master data ====================
    /// Company not selected
    CompanyNotSelected = 4001,
    /// Selected record belongs to another company
    CascadeMismatch = 4002,

    // ==================== 5xxx: Submission ====================
    /// Server rejected the request
    ServerRejected = 5001,
    /// Not enough photos captured
    CaptureIncomplete = 5002,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Network error
    NetworkError = 9003,
    /// Configuration error
    ConfigError = 9005,
    /// Local storage error
    StorageError = 9006,
}

impl ErrorCode {
    /// Numeric value of this code
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// True for [`ErrorCode::Success`]
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Default human-readable message
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::InvalidRequest => "Invalid request",
            Self::RequiredField => "Required field missing",

            Self::NotAuthenticated => "Please sign in first",
            Self::InvalidCredentials => "Invalid email or password",
            Self::SessionCorrupted => "Stored session is unreadable",

            Self::PermissionDenied => "Permission denied",
            Self::UnknownRole => "Unknown role",

            Self::DevicePermissionDenied => "Device permission denied",
            Self::DeviceUnavailable => "Device unavailable",
            Self::CaptureLocked => "Capture already finished",
            Self::ImageEncodingFailed => "Failed to encode photo",

            Self::CompanyNotSelected => "Company not selected",
            Self::CascadeMismatch => "Selection does not belong to the selected company",

            Self::ServerRejected => "Request rejected by server",
            Self::CaptureIncomplete => "Not enough photos captured",

            Self::InternalError => "Internal error",
            Self::NetworkError => "Network error",
            Self::ConfigError => "Configuration error",
            Self::StorageError => "Local storage error",
        }
    }

    /// Best-effort code for an HTTP status returned by the backend
    pub fn from_http_status(status: u16) -> Self {
        match status {
            200..=299 => Self::Success,
            400 | 422 => Self::ValidationFailed,
            401 => Self::NotAuthenticated,
            403 => Self::PermissionDenied,
            404 => Self::NotFound,
            500..=599 => Self::ServerRejected,
            _ => Self::Unknown,
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),

            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1005 => Ok(ErrorCode::SessionCorrupted),

            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::UnknownRole),

            3001 => Ok(ErrorCode::DevicePermissionDenied),
            3002 => Ok(ErrorCode::DeviceUnavailable),
            3003 => Ok(ErrorCode::CaptureLocked),
            3004 => Ok(ErrorCode::ImageEncodingFailed),

            4001 => Ok(ErrorCode::CompanyNotSelected),
            4002 => Ok(ErrorCode::CascadeMismatch),

            5001 => Ok(ErrorCode::ServerRejected),
            5002 => Ok(ErrorCode::CaptureIncomplete),

            9001 => Ok(ErrorCode::InternalError),
            9003 => Ok(ErrorCode::NetworkError),
            9005 => Ok(ErrorCode::ConfigError),
            9006 => Ok(ErrorCode::StorageError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
