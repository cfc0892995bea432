//! Attendance (absensi), Field Visit (dinas luar) and Face Enrollment Models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ApprovalStatus, AttendanceStatus, Transaction};
use crate::access::Stage;
use crate::listing::Listable;
use crate::types::{RecordId, optional_id, record_date};

/// One day of attendance for one employee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceEvent {
    pub id: RecordId,
    #[serde(default, deserialize_with = "optional_id")]
    pub employee_id: Option<RecordId>,
    #[serde(default, deserialize_with = "optional_id")]
    pub company_id: Option<RecordId>,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(deserialize_with = "record_date")]
    pub tanggal: NaiveDate,
    #[serde(default)]
    pub jam_masuk: Option<String>,
    #[serde(default)]
    pub jam_keluar: Option<String>,
    /// Server-relative photo paths
    #[serde(default)]
    pub foto_masuk: Option<String>,
    #[serde(default)]
    pub foto_keluar: Option<String>,
    #[serde(default)]
    pub latitude_masuk: Option<f64>,
    #[serde(default)]
    pub longitude_masuk: Option<f64>,
    #[serde(default)]
    pub latitude_keluar: Option<f64>,
    #[serde(default)]
    pub longitude_keluar: Option<f64>,
    #[serde(default)]
    pub status: AttendanceStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl AttendanceEvent {
    pub fn has_checked_out(&self) -> bool {
        self.jam_keluar.is_some()
    }
}

impl Listable for AttendanceEvent {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn list_date(&self) -> Option<NaiveDate> {
        Some(self.tanggal)
    }

    fn search_text(&self) -> Vec<&str> {
        self.employee_name.as_deref().into_iter().collect()
    }
}

impl Transaction for AttendanceEvent {
    fn owner_id(&self) -> Option<&RecordId> {
        self.employee_id.as_ref()
    }

    fn stage(&self) -> Stage {
        self.status.stage()
    }
}

/// Direction of a punch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunchKind {
    CheckIn,
    CheckOut,
    VisitIn,
    VisitOut,
}

impl PunchKind {
    /// Endpoint suffix for this punch
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::CheckIn => "check-in",
            Self::CheckOut => "check-out",
            Self::VisitIn => "visit-in",
            Self::VisitOut => "visit-out",
        }
    }

    /// Name of the photo part in the multipart body
    pub fn photo_field(&self) -> &'static str {
        match self {
            Self::CheckIn | Self::VisitIn => "foto_masuk",
            Self::CheckOut | Self::VisitOut => "foto_keluar",
        }
    }
}

/// Off-site duty (dinas luar) with visit-in / visit-out punches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visit {
    pub id: RecordId,
    #[serde(default, deserialize_with = "optional_id")]
    pub employee_id: Option<RecordId>,
    #[serde(default, deserialize_with = "optional_id")]
    pub company_id: Option<RecordId>,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(deserialize_with = "record_date")]
    pub tanggal: NaiveDate,
    /// Destination / client name
    #[serde(default)]
    pub tujuan: Option<String>,
    #[serde(default)]
    pub keterangan: Option<String>,
    #[serde(default)]
    pub foto_masuk: Option<String>,
    #[serde(default)]
    pub foto_keluar: Option<String>,
    #[serde(default)]
    pub status: ApprovalStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Listable for Visit {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn list_date(&self) -> Option<NaiveDate> {
        Some(self.tanggal)
    }

    fn search_text(&self) -> Vec<&str> {
        [
            self.employee_name.as_deref(),
            self.tujuan.as_deref(),
            self.keterangan.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl Transaction for Visit {
    fn owner_id(&self) -> Option<&RecordId> {
        self.employee_id.as_ref()
    }

    fn stage(&self) -> Stage {
        self.status.stage()
    }
}

/// Enrolled face photos for an employee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceProfile {
    #[serde(alias = "user_id")]
    pub employee_id: RecordId,
    /// Server-relative photo paths
    #[serde(default)]
    pub photos: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attendance_is_closed_for_everyone() {
        let json = r#"{"id":9,"employee_id":10,"tanggal":"2025-01-15",
            "jam_masuk":"08:01","status":"telat"}"#;
        let event: AttendanceEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.status, AttendanceStatus::Late);
        assert_eq!(event.stage(), Stage::Closed);
        assert!(!event.has_checked_out());
    }

    #[test]
    fn test_punch_kind_fields() {
        assert_eq!(PunchKind::CheckIn.path_segment(), "check-in");
        assert_eq!(PunchKind::VisitOut.path_segment(), "visit-out");
        assert_eq!(PunchKind::VisitIn.photo_field(), "foto_masuk");
        assert_eq!(PunchKind::CheckOut.photo_field(), "foto_keluar");
    }
}
