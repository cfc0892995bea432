//! Leave (cuti) and Overtime (lembur) Models

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::{ApprovalStatus, Transaction};
use crate::access::Stage;
use crate::listing::Listable;
use crate::types::{RecordId, optional_id, record_date};

/// Leave request (cuti)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: RecordId,
    #[serde(default, deserialize_with = "optional_id")]
    pub employee_id: Option<RecordId>,
    #[serde(default, deserialize_with = "optional_id")]
    pub company_id: Option<RecordId>,
    #[serde(default)]
    pub employee_name: Option<String>,
    /// Leave type (tahunan, sakit, ...)
    #[serde(default)]
    pub jenis_cuti: String,
    #[serde(deserialize_with = "record_date")]
    pub tanggal_mulai: NaiveDate,
    #[serde(deserialize_with = "record_date")]
    pub tanggal_selesai: NaiveDate,
    #[serde(default)]
    pub alasan: Option<String>,
    #[serde(default)]
    pub status: ApprovalStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl LeaveRequest {
    /// Inclusive number of calendar days covered
    pub fn days(&self) -> i64 {
        (self.tanggal_selesai - self.tanggal_mulai).num_days() + 1
    }
}

/// Create leave request payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_leave_range"))]
pub struct LeaveCreate {
    #[validate(required(message = "Employee is required"))]
    pub employee_id: Option<RecordId>,
    #[validate(required(message = "Company is required"))]
    pub company_id: Option<RecordId>,
    #[validate(length(min = 1, message = "Leave type is required"))]
    pub jenis_cuti: String,
    #[validate(required(message = "Start date is required"))]
    pub tanggal_mulai: Option<NaiveDate>,
    #[validate(required(message = "End date is required"))]
    pub tanggal_selesai: Option<NaiveDate>,
    #[validate(length(min = 1, message = "Reason is required"))]
    pub alasan: String,
}

fn validate_leave_range(leave: &LeaveCreate) -> Result<(), ValidationError> {
    match (leave.tanggal_mulai, leave.tanggal_selesai) {
        (Some(start), Some(end)) if end < start => Err(ValidationError::new("date_range")
            .with_message("End date must not be before start date".into())),
        _ => Ok(()),
    }
}

impl Listable for LeaveRequest {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn list_date(&self) -> Option<NaiveDate> {
        Some(self.tanggal_mulai)
    }

    fn search_text(&self) -> Vec<&str> {
        let mut fields = vec![self.jenis_cuti.as_str()];
        fields.extend(self.employee_name.as_deref());
        fields.extend(self.alasan.as_deref());
        fields
    }
}

impl Transaction for LeaveRequest {
    fn owner_id(&self) -> Option<&RecordId> {
        self.employee_id.as_ref()
    }

    fn stage(&self) -> Stage {
        self.status.stage()
    }
}

/// Overtime request (lembur)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overtime {
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
    pub jam_mulai: Option<NaiveTime>,
    #[serde(default)]
    pub jam_selesai: Option<NaiveTime>,
    #[serde(default)]
    pub keterangan: Option<String>,
    #[serde(default)]
    pub status: ApprovalStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Create overtime payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_overtime_hours"))]
pub struct OvertimeCreate {
    #[validate(required(message = "Employee is required"))]
    pub employee_id: Option<RecordId>,
    #[validate(required(message = "Company is required"))]
    pub company_id: Option<RecordId>,
    #[validate(required(message = "Date is required"))]
    pub tanggal: Option<NaiveDate>,
    #[validate(required(message = "Start time is required"))]
    pub jam_mulai: Option<NaiveTime>,
    #[validate(required(message = "End time is required"))]
    pub jam_selesai: Option<NaiveTime>,
    #[validate(length(min = 1, message = "Description is required"))]
    pub keterangan: String,
}

fn validate_overtime_hours(overtime: &OvertimeCreate) -> Result<(), ValidationError> {
    match (overtime.jam_mulai, overtime.jam_selesai) {
        (Some(start), Some(end)) if end <= start => Err(ValidationError::new("time_range")
            .with_message("End time must be after start time".into())),
        _ => Ok(()),
    }
}

impl Listable for Overtime {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn list_date(&self) -> Option<NaiveDate> {
        Some(self.tanggal)
    }

    fn search_text(&self) -> Vec<&str> {
        let mut fields = Vec::with_capacity(2);
        fields.extend(self.employee_name.as_deref());
        fields.extend(self.keterangan.as_deref());
        fields
    }
}

impl Transaction for Overtime {
    fn owner_id(&self) -> Option<&RecordId> {
        self.employee_id.as_ref()
    }

    fn stage(&self) -> Stage {
        self.status.stage()
    }
}
