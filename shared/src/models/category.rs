//! Expense Category Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cascade::CompanyOwned;
use crate::types::{RecordId, optional_id};

/// Expense category with a fixed cap, used by reimbursement and kasbon forms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseCategory {
    pub id: RecordId,
    #[serde(alias = "nama")]
    pub name: String,
    #[serde(default, deserialize_with = "optional_id")]
    pub company_id: Option<RecordId>,
    /// Fixed category amount
    #[serde(default)]
    pub jumlah: Decimal,
}

impl CompanyOwned for ExpenseCategory {
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
