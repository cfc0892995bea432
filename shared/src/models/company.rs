//! Company Model

use serde::{Deserialize, Serialize};

use crate::types::RecordId;

/// Company entity, top of every ownership cascade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: RecordId,
    #[serde(alias = "nama")]
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
}
