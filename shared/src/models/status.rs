//! Record status enums
//!
//! Each domain has its own closed status set. Unknown wire values decode to
//! `Unknown` so a new server-side status never breaks a list screen.

use serde::{Deserialize, Serialize};

use crate::access::Stage;

/// Approval lifecycle: `pending → approve` or `pending → reject`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approve,
    Reject,
    #[serde(other)]
    Unknown,
}

impl ApprovalStatus {
    pub fn stage(&self) -> Stage {
        match self {
            Self::Pending => Stage::AwaitingApproval,
            Self::Approve | Self::Reject | Self::Unknown => Stage::Closed,
        }
    }
}

/// Payable lifecycle: `pending → approve → paid` or `pending → reject`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Approve,
    Paid,
    Reject,
    #[serde(other)]
    Unknown,
}

impl PaymentStatus {
    pub fn stage(&self) -> Stage {
        match self {
            Self::Pending => Stage::AwaitingApproval,
            Self::Approve => Stage::AwaitingPayment,
            Self::Paid | Self::Reject | Self::Unknown => Stage::Closed,
        }
    }
}

/// Work progress: `pending → progress → done`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStatus {
    #[default]
    Pending,
    Progress,
    Done,
    #[serde(other)]
    Unknown,
}

impl ProgressStatus {
    pub fn stage(&self) -> Stage {
        match self {
            Self::Pending | Self::Progress => Stage::Open,
            Self::Done | Self::Unknown => Stage::Closed,
        }
    }
}

/// Attendance punctuality, set by the server at check-in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    #[default]
    #[serde(alias = "hadir")]
    OnTime,
    #[serde(alias = "telat", alias = "terlambat")]
    Late,
    #[serde(other)]
    Unknown,
}

impl AttendanceStatus {
    pub fn stage(&self) -> Stage {
        Stage::Closed
    }
}

/// Inventory item condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InventoryStatus {
    #[default]
    #[serde(alias = "tersedia")]
    Available,
    #[serde(alias = "dipinjam")]
    Borrowed,
    #[serde(alias = "rusak")]
    Broken,
    #[serde(other)]
    Unknown,
}

impl InventoryStatus {
    pub fn stage(&self) -> Stage {
        Stage::Open
    }
}
