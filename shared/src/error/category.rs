//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// The category decides how the front end presents a failure: validation
/// errors render inline next to the field, everything else becomes a
/// blocking alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Device errors (3xxx)
    Device,
    /// Master data errors (4xxx)
    MasterData,
    /// Submission errors (5xxx)
    Submission,
    /// System errors (9xxx and anything unassigned)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Device,
            4000..5000 => Self::MasterData,
            5000..6000 => Self::Submission,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Device => "device",
            Self::MasterData => "master_data",
            Self::Submission => "submission",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }

    /// Whether the failure is shown inline on the form instead of as an alert
    pub fn is_inline(&self) -> bool {
        matches!(self, Self::ValidationFailed | Self::RequiredField)
    }
}
