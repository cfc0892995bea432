//! User-facing outcome of an action
//!
//! Success alerts close themselves after [`SUCCESS_DISMISS`] and usually
//! carry a page to navigate to; failure alerts stay until dismissed.

use std::time::Duration;

use serde::Serialize;
use shared::error::ErrorCode;

use crate::{ClientError, ClientResult};

pub const SUCCESS_DISMISS: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
    /// Failure code, for callers that branch on it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigate_to: Option<String>,
    #[serde(skip)]
    pub auto_dismiss: Option<Duration>,
}

impl Alert {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Success,
            message: message.into(),
            code: None,
            navigate_to: None,
            auto_dismiss: Some(SUCCESS_DISMISS),
        }
    }

    pub fn failure(error: &ClientError) -> Self {
        Self {
            kind: AlertKind::Failure,
            message: error.alert_message(),
            code: Some(error.code()),
            navigate_to: None,
            auto_dismiss: None,
        }
    }

    /// Page to open once the alert closes
    pub fn navigate(mut self, path: impl Into<String>) -> Self {
        self.navigate_to = Some(path.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.kind == AlertKind::Success
    }

    /// Success alert for `Ok`, failure alert for `Err`
    pub fn from_result<T>(result: &ClientResult<T>, success_message: &str) -> Self {
        match result {
            Ok(_) => Self::success(success_message),
            Err(e) => Self::failure(e),
        }
    }

    /// Wait until a self-dismissing alert closes. Returns the navigation
    /// target, if any. Failure alerts return immediately with `None`.
    pub async fn settle(&self) -> Option<&str> {
        let delay = self.auto_dismiss?;
        tokio::time::sleep(delay).await;
        self.navigate_to.as_deref()
    }
}

impl std::fmt::Display for Alert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            AlertKind::Success => write!(f, "✓ {}", self.message),
            AlertKind::Failure => write!(f, "✗ {}", self.message),
        }
    }
}
