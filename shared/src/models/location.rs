//! Location Model (attendance geofence)

use serde::{Deserialize, Serialize};

use crate::cascade::CompanyOwned;
use crate::types::{RecordId, optional_id};

/// Office location used for GPS-tagged attendance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: RecordId,
    #[serde(alias = "nama")]
    pub name: String,
    #[serde(default, deserialize_with = "optional_id")]
    pub company_id: Option<RecordId>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Allowed check-in radius in meters
    #[serde(default)]
    pub radius: Option<f64>,
}

impl CompanyOwned for Location {
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
