//! Reimbursement and Kasbon (cash advance) Models
//!
//! Both are capped by an expense category: the form copies the category's
//! `jumlah` and derives `total`/`sisa` from the amount already used.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{PaymentStatus, Transaction};
use crate::access::Stage;
use crate::amounts::{ClaimAmounts, DerivedAmounts};
use crate::listing::Listable;
use crate::types::{RecordId, optional_id, record_date};

/// Expense reimbursement request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reimbursement {
    pub id: RecordId,
    #[serde(default, deserialize_with = "optional_id")]
    pub employee_id: Option<RecordId>,
    #[serde(default, deserialize_with = "optional_id")]
    pub company_id: Option<RecordId>,
    #[serde(default, deserialize_with = "optional_id")]
    pub category_id: Option<RecordId>,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(deserialize_with = "record_date")]
    pub tanggal: NaiveDate,
    #[serde(default)]
    pub jumlah: Option<Decimal>,
    #[serde(default)]
    pub terpakai: Option<Decimal>,
    #[serde(default)]
    pub total: Option<Decimal>,
    #[serde(default)]
    pub sisa: Option<Decimal>,
    #[serde(default)]
    pub keterangan: Option<String>,
    /// Server-relative receipt path
    #[serde(default)]
    pub bukti: Option<String>,
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Create reimbursement payload
///
/// `jumlah`, `total` and `sisa` are filled from the amount calculator, never
/// typed by the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ReimbursementCreate {
    #[validate(required(message = "Employee is required"))]
    pub employee_id: Option<RecordId>,
    #[validate(required(message = "Company is required"))]
    pub company_id: Option<RecordId>,
    #[validate(required(message = "Category is required"))]
    pub category_id: Option<RecordId>,
    #[validate(required(message = "Date is required"))]
    pub tanggal: Option<NaiveDate>,
    #[validate(required(message = "Amount is required"))]
    pub jumlah: Option<Decimal>,
    pub terpakai: Decimal,
    pub total: Option<Decimal>,
    pub sisa: Option<Decimal>,
    #[validate(length(min = 1, message = "Description is required"))]
    pub keterangan: String,
}

impl ClaimAmounts for ReimbursementCreate {
    fn apply_amounts(
        &mut self,
        jumlah: Option<Decimal>,
        terpakai: Decimal,
        derived: Option<DerivedAmounts>,
    ) {
        self.jumlah = jumlah;
        self.terpakai = terpakai;
        self.total = derived.map(|d| d.total);
        self.sisa = derived.map(|d| d.sisa);
    }
}

impl Listable for Reimbursement {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn list_date(&self) -> Option<NaiveDate> {
        Some(self.tanggal)
    }

    fn search_text(&self) -> Vec<&str> {
        [
            self.employee_name.as_deref(),
            self.category_name.as_deref(),
            self.keterangan.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl Transaction for Reimbursement {
    fn owner_id(&self) -> Option<&RecordId> {
        self.employee_id.as_ref()
    }

    fn stage(&self) -> Stage {
        self.status.stage()
    }
}

/// Cash advance (kasbon)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kasbon {
    pub id: RecordId,
    #[serde(default, deserialize_with = "optional_id")]
    pub employee_id: Option<RecordId>,
    #[serde(default, deserialize_with = "optional_id")]
    pub company_id: Option<RecordId>,
    #[serde(default, deserialize_with = "optional_id")]
    pub category_id: Option<RecordId>,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(deserialize_with = "record_date")]
    pub tanggal: NaiveDate,
    #[serde(default)]
    pub jumlah: Option<Decimal>,
    #[serde(default)]
    pub terpakai: Option<Decimal>,
    #[serde(default)]
    pub total: Option<Decimal>,
    #[serde(default)]
    pub sisa: Option<Decimal>,
    /// Purpose of the advance
    #[serde(default)]
    pub keperluan: Option<String>,
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Create kasbon payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct KasbonCreate {
    #[validate(required(message = "Employee is required"))]
    pub employee_id: Option<RecordId>,
    #[validate(required(message = "Company is required"))]
    pub company_id: Option<RecordId>,
    #[validate(required(message = "Category is required"))]
    pub category_id: Option<RecordId>,
    #[validate(required(message = "Date is required"))]
    pub tanggal: Option<NaiveDate>,
    #[validate(required(message = "Amount is required"))]
    pub jumlah: Option<Decimal>,
    pub terpakai: Decimal,
    pub total: Option<Decimal>,
    pub sisa: Option<Decimal>,
    #[validate(length(min = 1, message = "Purpose is required"))]
    pub keperluan: String,
}

impl ClaimAmounts for KasbonCreate {
    fn apply_amounts(
        &mut self,
        jumlah: Option<Decimal>,
        terpakai: Decimal,
        derived: Option<DerivedAmounts>,
    ) {
        self.jumlah = jumlah;
        self.terpakai = terpakai;
        self.total = derived.map(|d| d.total);
        self.sisa = derived.map(|d| d.sisa);
    }
}

impl Listable for Kasbon {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn list_date(&self) -> Option<NaiveDate> {
        Some(self.tanggal)
    }

    fn search_text(&self) -> Vec<&str> {
        [
            self.employee_name.as_deref(),
            self.category_name.as_deref(),
            self.keperluan.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl Transaction for Kasbon {
    fn owner_id(&self) -> Option<&RecordId> {
        self.employee_id.as_ref()
    }

    fn stage(&self) -> Stage {
        self.status.stage()
    }
}
