//! Division Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::cascade::CompanyOwned;
use crate::types::{RecordId, optional_id};

/// Division entity (divisi)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Division {
    pub id: RecordId,
    #[serde(alias = "nama")]
    pub name: String,
    #[serde(default, deserialize_with = "optional_id")]
    pub company_id: Option<RecordId>,
}

/// Create division payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct DivisionCreate {
    #[validate(length(min = 1, message = "Division name is required"))]
    pub name: String,
    #[validate(required(message = "Company is required"))]
    pub company_id: Option<RecordId>,
}

impl CompanyOwned for Division {
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
