//! Document (dokumen) and Inventory (inventaris) Models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{ApprovalStatus, InventoryStatus, Transaction};
use crate::access::Stage;
use crate::listing::Listable;
use crate::types::{RecordId, optional_id, optional_record_date, parse_record_date};

/// Uploaded employee document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: RecordId,
    #[serde(default, deserialize_with = "optional_id")]
    pub company_id: Option<RecordId>,
    #[serde(default, deserialize_with = "optional_id")]
    pub employee_id: Option<RecordId>,
    #[serde(default)]
    pub employee_name: Option<String>,
    pub nama_dokumen: String,
    /// Server-relative file path
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub status: ApprovalStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Document metadata sent alongside the file part
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct DocumentCreate {
    #[validate(required(message = "Company is required"))]
    pub company_id: Option<RecordId>,
    #[validate(required(message = "Employee is required"))]
    pub employee_id: Option<RecordId>,
    #[validate(length(min = 1, message = "Document name is required"))]
    pub nama_dokumen: String,
}

impl Listable for Document {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn list_date(&self) -> Option<NaiveDate> {
        self.created_at.as_deref().and_then(parse_record_date)
    }

    fn search_text(&self) -> Vec<&str> {
        let mut fields = vec![self.nama_dokumen.as_str()];
        fields.extend(self.employee_name.as_deref());
        fields
    }
}

impl Transaction for Document {
    fn owner_id(&self) -> Option<&RecordId> {
        self.employee_id.as_ref()
    }

    fn stage(&self) -> Stage {
        self.status.stage()
    }
}

/// Inventory item (inventaris)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: RecordId,
    #[serde(default, deserialize_with = "optional_id")]
    pub company_id: Option<RecordId>,
    /// Employee currently holding the item
    #[serde(default, deserialize_with = "optional_id")]
    pub employee_id: Option<RecordId>,
    pub nama_barang: String,
    #[serde(default)]
    pub kode: Option<String>,
    #[serde(default)]
    pub jumlah: u32,
    #[serde(default, deserialize_with = "optional_record_date")]
    pub tanggal: Option<NaiveDate>,
    #[serde(default)]
    pub foto: Option<String>,
    #[serde(default)]
    pub status: InventoryStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Create inventory item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct InventoryCreate {
    #[validate(required(message = "Company is required"))]
    pub company_id: Option<RecordId>,
    pub employee_id: Option<RecordId>,
    #[validate(length(min = 1, message = "Item name is required"))]
    pub nama_barang: String,
    pub kode: Option<String>,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub jumlah: u32,
    pub tanggal: Option<NaiveDate>,
    pub status: InventoryStatus,
}

impl Listable for InventoryItem {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn list_date(&self) -> Option<NaiveDate> {
        self.tanggal
            .or_else(|| self.created_at.as_deref().and_then(parse_record_date))
    }

    fn search_text(&self) -> Vec<&str> {
        let mut fields = vec![self.nama_barang.as_str()];
        fields.extend(self.kode.as_deref());
        fields
    }
}

impl Transaction for InventoryItem {
    fn owner_id(&self) -> Option<&RecordId> {
        self.employee_id.as_ref()
    }

    fn stage(&self) -> Stage {
        self.status.stage()
    }
}
