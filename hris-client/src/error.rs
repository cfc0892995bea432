//! Client error types

use shared::access::Action;
use shared::error::ErrorCode;
use shared::listing::DeleteFlowError;
use shared::validation::FieldErrors;
use thiserror::Error;

use crate::capture::{CaptureError, DeviceError};

/// Message shown when the server gave none
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connect, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response. `message` is the server's text when it sent one.
    #[error("Server rejected request ({status}): {message}")]
    Server { status: u16, message: String },

    /// 401, or no stored session
    #[error("Authentication required")]
    Unauthorized,

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Required-field checks failed before sending
    #[error("Validation error: {0}")]
    Validation(#[from] FieldErrors),

    /// Action not offered for this record / role
    #[error("Action not allowed: {0:?}")]
    NotAllowed(Action),

    /// Superadmin submitted without picking a company
    #[error("Company must be selected")]
    CompanyNotSelected,

    #[error(transparent)]
    Device(#[from] DeviceError),

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Delete(#[from] DeleteFlowError),

    /// Session file exists but cannot be used
    #[error("Session error: {0}")]
    Session(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Http(_) => ErrorCode::NetworkError,
            Self::Server { status, .. } => match ErrorCode::from_http_status(*status) {
                ErrorCode::Unknown => ErrorCode::ServerRejected,
                code => code,
            },
            Self::Unauthorized => ErrorCode::NotAuthenticated,
            Self::InvalidResponse(_) | Self::Serialization(_) => ErrorCode::InternalError,
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::NotAllowed(_) => ErrorCode::PermissionDenied,
            Self::CompanyNotSelected => ErrorCode::CompanyNotSelected,
            Self::Device(DeviceError::Unavailable(_)) => ErrorCode::DeviceUnavailable,
            Self::Device(_) => ErrorCode::DevicePermissionDenied,
            Self::Capture(CaptureError::Locked) => ErrorCode::CaptureLocked,
            Self::Capture(CaptureError::CameraOff) => ErrorCode::DeviceUnavailable,
            Self::Capture(CaptureError::Incomplete { .. }) => ErrorCode::CaptureIncomplete,
            Self::Capture(CaptureError::Busy) => ErrorCode::InvalidRequest,
            Self::Capture(CaptureError::InvalidFrame { .. }) => ErrorCode::ImageEncodingFailed,
            Self::Delete(DeleteFlowError::NotListed(_)) => ErrorCode::NotFound,
            Self::Delete(_) => ErrorCode::InvalidRequest,
            Self::Session(_) => ErrorCode::SessionCorrupted,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::Io(_) => ErrorCode::StorageError,
            Self::Image(_) => ErrorCode::ImageEncodingFailed,
        }
    }

    /// Text for the failure alert.
    ///
    /// Server messages are shown verbatim; transport failures get the same
    /// generic text as a message-less rejection.
    pub fn alert_message(&self) -> String {
        match self {
            Self::Server { message, .. } => message.clone(),
            Self::Http(_) | Self::InvalidResponse(_) | Self::Serialization(_) => {
                GENERIC_FAILURE.to_string()
            }
            Self::Validation(errors) => errors
                .iter()
                .next()
                .and_then(|(_, messages)| messages.first().cloned())
                .unwrap_or_else(|| ErrorCode::ValidationFailed.message().to_string()),
            Self::Device(e) => e.to_string(),
            Self::Capture(e) => e.to_string(),
            other => other.code().message().to_string(),
        }
    }

    /// Session missing or rejected by the server
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
