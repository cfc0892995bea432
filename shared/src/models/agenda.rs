//! Meeting (rapat) and Task (tugas) Models

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{ProgressStatus, Transaction};
use crate::access::Stage;
use crate::listing::Listable;
use crate::types::{RecordId, optional_id, record_date};

/// Meeting (rapat)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: RecordId,
    #[serde(default, deserialize_with = "optional_id")]
    pub company_id: Option<RecordId>,
    /// Organizer
    #[serde(default, deserialize_with = "optional_id")]
    pub created_by: Option<RecordId>,
    pub judul: String,
    #[serde(deserialize_with = "record_date")]
    pub tanggal: NaiveDate,
    #[serde(default)]
    pub jam_mulai: Option<NaiveTime>,
    #[serde(default)]
    pub jam_selesai: Option<NaiveTime>,
    #[serde(default)]
    pub lokasi: Option<String>,
    /// Minutes
    #[serde(default)]
    pub notulen: Option<String>,
    #[serde(default)]
    pub peserta: Vec<RecordId>,
    #[serde(default)]
    pub status: ProgressStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Create meeting payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct MeetingCreate {
    #[validate(required(message = "Company is required"))]
    pub company_id: Option<RecordId>,
    #[validate(length(min = 1, message = "Title is required"))]
    pub judul: String,
    #[validate(required(message = "Date is required"))]
    pub tanggal: Option<NaiveDate>,
    #[validate(required(message = "Start time is required"))]
    pub jam_mulai: Option<NaiveTime>,
    pub jam_selesai: Option<NaiveTime>,
    #[validate(length(min = 1, message = "Location is required"))]
    pub lokasi: String,
    #[validate(length(min = 1, message = "Pick at least one participant"))]
    pub peserta: Vec<RecordId>,
}

impl Listable for Meeting {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn list_date(&self) -> Option<NaiveDate> {
        Some(self.tanggal)
    }

    fn search_text(&self) -> Vec<&str> {
        let mut fields = vec![self.judul.as_str()];
        fields.extend(self.lokasi.as_deref());
        fields
    }
}

impl Transaction for Meeting {
    fn owner_id(&self) -> Option<&RecordId> {
        self.created_by.as_ref()
    }

    fn stage(&self) -> Stage {
        self.status.stage()
    }
}

/// Task assignment (tugas)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: RecordId,
    #[serde(default, deserialize_with = "optional_id")]
    pub company_id: Option<RecordId>,
    /// Assignee
    #[serde(default, deserialize_with = "optional_id")]
    pub employee_id: Option<RecordId>,
    #[serde(default)]
    pub employee_name: Option<String>,
    pub judul: String,
    #[serde(default)]
    pub deskripsi: Option<String>,
    /// Deadline
    #[serde(deserialize_with = "record_date")]
    pub tanggal: NaiveDate,
    #[serde(default)]
    pub status: ProgressStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Create task payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TaskCreate {
    #[validate(required(message = "Company is required"))]
    pub company_id: Option<RecordId>,
    #[validate(required(message = "Assignee is required"))]
    pub employee_id: Option<RecordId>,
    #[validate(length(min = 1, message = "Title is required"))]
    pub judul: String,
    pub deskripsi: Option<String>,
    #[validate(required(message = "Deadline is required"))]
    pub tanggal: Option<NaiveDate>,
    pub status: ProgressStatus,
}

impl Listable for Task {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn list_date(&self) -> Option<NaiveDate> {
        Some(self.tanggal)
    }

    fn search_text(&self) -> Vec<&str> {
        let mut fields = vec![self.judul.as_str()];
        fields.extend(self.deskripsi.as_deref());
        fields.extend(self.employee_name.as_deref());
        fields
    }
}

impl Transaction for Task {
    fn owner_id(&self) -> Option<&RecordId> {
        self.employee_id.as_ref()
    }

    fn stage(&self) -> Stage {
        self.status.stage()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meeting_requires_participants() {
        let draft = MeetingCreate {
            company_id: Some(RecordId::from(1)),
            judul: "Evaluasi bulanan".into(),
            tanggal: NaiveDate::from_ymd_opt(2025, 4, 1),
            jam_mulai: NaiveTime::from_hms_opt(9, 0, 0),
            lokasi: "Ruang 2".into(),
            ..Default::default()
        };
        let errors = draft.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("peserta"));
    }

    #[test]
    fn test_task_in_progress_is_open() {
        let json = r#"{"id":4,"employee_id":10,"judul":"Stock opname",
            "tanggal":"2025-05-01","status":"progress"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.stage(), Stage::Open);
        assert_eq!(task.search_text(), vec!["Stock opname"]);
    }
}
