//! Employee Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Role;
use crate::cascade::CompanyOwned;
use crate::types::{RecordId, optional_id};

/// Employee record (pegawai)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: RecordId,
    #[serde(alias = "nama")]
    pub name: String,
    #[serde(default, deserialize_with = "optional_id")]
    pub company_id: Option<RecordId>,
    #[serde(default, deserialize_with = "optional_id")]
    pub division_id: Option<RecordId>,
    #[serde(default, deserialize_with = "optional_id")]
    pub location_id: Option<RecordId>,
    #[serde(default, deserialize_with = "optional_id")]
    pub shift_id: Option<RecordId>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    /// Server-relative profile photo path
    #[serde(default)]
    pub foto: Option<String>,
}

/// Create / update employee payload
///
/// Sent as multipart when a profile photo is attached.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct EmployeeCreate {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Email is not valid"))]
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[validate(required(message = "Company is required"))]
    pub company_id: Option<RecordId>,
    #[validate(required(message = "Division is required"))]
    pub division_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift_id: Option<RecordId>,
    pub role: Option<Role>,
    /// Only sent on create or password reset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl CompanyOwned for Employee {
    fn record_id(&self) -> &RecordId {
        &self.id
    }

    fn owner_company(&self) -> Option<&RecordId> {
        self.company_id.as_ref()
    }

    fn label(&self) -> &str {
        &self.name
    }
}
