//! Shift Definition Model

use serde::{Deserialize, Serialize};

use crate::cascade::CompanyOwned;
use crate::types::{RecordId, optional_id};

/// Working shift definition (jam kerja)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftDefinition {
    pub id: RecordId,
    #[serde(alias = "nama")]
    pub name: String,
    #[serde(default, deserialize_with = "optional_id")]
    pub company_id: Option<RecordId>,
    /// Start time, `HH:MM`
    #[serde(default)]
    pub jam_masuk: Option<String>,
    /// End time, `HH:MM`
    #[serde(default)]
    pub jam_keluar: Option<String>,
}

impl CompanyOwned for ShiftDefinition {
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
