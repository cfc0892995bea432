//! Role capability table
//!
//! Every screen asks the same questions of the logged-in role: is the company
//! selector shown, which collection is fetched, which company / employee does
//! the form submit for, and which row actions are offered. The answers live
//! here so they are decided once.
//!
//! This is presentation gating only. The server remains the authority.

use serde::{Deserialize, Serialize};

use crate::models::{Identity, Role, Transaction};
use crate::types::RecordId;

/// Lifecycle stage of a transactional record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Waiting for an admin decision
    AwaitingApproval,
    /// Approved, waiting to be paid out
    AwaitingPayment,
    /// Editable, no approval step (tasks, meetings, inventory)
    Open,
    /// Terminal
    Closed,
}

/// Row action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Edit,
    Delete,
    Approve,
    Reject,
    Pay,
}

/// Which collection a list screen fetches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", content = "id", rename_all = "snake_case")]
pub enum Scope {
    /// Everything the token can see
    All,
    /// One company's records
    Company(RecordId),
    /// The caller's own records
    Mine,
}

impl Role {
    /// Only superadmin picks a company; admin is pinned to its own.
    pub fn can_see_company_selector(&self) -> bool {
        matches!(self, Role::SuperAdmin)
    }

    /// Pegawai always submits for itself.
    pub fn can_see_employee_selector(&self) -> bool {
        !matches!(self, Role::Pegawai)
    }

    /// Actions offered for a record in `stage`.
    ///
    /// `is_owner` only matters for pegawai, who may touch nothing but their
    /// own records.
    pub fn allowed_actions(&self, stage: Stage, is_owner: bool) -> Vec<Action> {
        match self {
            Role::Pegawai if !is_owner => Vec::new(),
            Role::Pegawai => match stage {
                Stage::AwaitingApproval => vec![Action::Edit, Action::Delete],
                Stage::Open => vec![Action::Edit],
                Stage::AwaitingPayment | Stage::Closed => Vec::new(),
            },
            Role::SuperAdmin | Role::Admin => match stage {
                Stage::AwaitingApproval => {
                    vec![Action::Edit, Action::Delete, Action::Approve, Action::Reject]
                }
                Stage::AwaitingPayment => vec![Action::Pay],
                Stage::Open => vec![Action::Edit, Action::Delete],
                Stage::Closed => vec![Action::Delete],
            },
        }
    }
}

impl Identity {
    /// Collection fetched by list screens
    pub fn scope_query(&self) -> Scope {
        match (self.role, &self.company_id) {
            (Role::SuperAdmin, _) => Scope::All,
            (Role::Admin, Some(company)) => Scope::Company(company.clone()),
            // Admin accounts without a company fall back to server-side scoping.
            (Role::Admin, None) => Scope::All,
            (Role::Pegawai, _) => Scope::Mine,
        }
    }

    /// Company a form submits for.
    ///
    /// Superadmin uses the selector value; everyone else is pinned to the
    /// company on the identity regardless of what was selected.
    pub fn effective_company(&self, selected: Option<&RecordId>) -> Option<RecordId> {
        if self.role.can_see_company_selector() {
            selected.filter(|id| !id.is_empty()).cloned()
        } else {
            self.company_id.clone()
        }
    }

    /// Employee a form submits for.
    pub fn effective_employee(&self, selected: Option<&RecordId>) -> Option<RecordId> {
        if self.role.can_see_employee_selector() {
            selected.filter(|id| !id.is_empty()).cloned()
        } else {
            Some(self.id.clone())
        }
    }

    /// Actions offered on `record` for this identity
    pub fn actions_for<T: Transaction>(&self, record: &T) -> Vec<Action> {
        let is_owner = record.owner_id().is_some_and(|owner| self.is_self(owner));
        self.role.allowed_actions(record.stage(), is_owner)
    }

    pub fn can<T: Transaction>(&self, record: &T, action: Action) -> bool {
        self.actions_for(record).contains(&action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Kasbon, PaymentStatus};
    use chrono::NaiveDate;

    fn identity(role: Role, company: Option<i64>) -> Identity {
        Identity {
            id: RecordId::from(10),
            name: "Budi".into(),
            role,
            company_id: company.map(RecordId::from),
            email: None,
        }
    }

    fn kasbon(owner: i64, status: PaymentStatus) -> Kasbon {
        Kasbon {
            id: RecordId::from(1),
            employee_id: Some(RecordId::from(owner)),
            company_id: Some(RecordId::from(1)),
            category_id: None,
            employee_name: None,
            category_name: None,
            tanggal: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            jumlah: None,
            terpakai: None,
            total: None,
            sisa: None,
            keperluan: None,
            status,
            created_at: None,
        }
    }

    #[test]
    fn test_admin_company_is_pinned() {
        let admin = identity(Role::Admin, Some(7));
        assert!(!admin.role.can_see_company_selector());
        let other = RecordId::from(99);
        assert_eq!(admin.effective_company(Some(&other)), Some(RecordId::from(7)));
        assert_eq!(admin.effective_company(None), Some(RecordId::from(7)));
        assert_eq!(admin.scope_query(), Scope::Company(RecordId::from(7)));
    }

    #[test]
    fn test_superadmin_uses_selection() {
        let root = identity(Role::SuperAdmin, None);
        assert!(root.role.can_see_company_selector());
        assert_eq!(root.effective_company(None), None);
        assert_eq!(root.effective_company(Some(&RecordId::from(""))), None);
        assert_eq!(
            root.effective_company(Some(&RecordId::from(3))),
            Some(RecordId::from(3))
        );
        assert_eq!(root.scope_query(), Scope::All);
    }

    #[test]
    fn test_pegawai_employee_is_self() {
        let me = identity(Role::Pegawai, Some(1));
        assert!(!me.role.can_see_employee_selector());
        assert!(!me.role.can_see_company_selector());
        let someone_else = RecordId::from(42);
        assert_eq!(me.effective_employee(Some(&someone_else)), Some(RecordId::from(10)));
        assert_eq!(me.effective_employee(None), Some(RecordId::from(10)));
        assert_eq!(me.scope_query(), Scope::Mine);
    }

    #[test]
    fn test_admin_without_company_scope() {
        let admin = identity(Role::Admin, None);
        assert_eq!(admin.scope_query(), Scope::All);
        assert_eq!(admin.effective_company(Some(&RecordId::from(3))), None);
    }

    #[test]
    fn test_owner_loses_edit_after_approval() {
        let me = identity(Role::Pegawai, Some(1));
        let pending = kasbon(10, PaymentStatus::Pending);
        assert_eq!(me.actions_for(&pending), vec![Action::Edit, Action::Delete]);

        let approved = kasbon(10, PaymentStatus::Approve);
        assert!(me.actions_for(&approved).is_empty());
        assert!(!me.can(&approved, Action::Delete));
    }

    #[test]
    fn test_pegawai_cannot_touch_others() {
        let me = identity(Role::Pegawai, Some(1));
        let theirs = kasbon(11, PaymentStatus::Pending);
        assert!(me.actions_for(&theirs).is_empty());
    }

    #[test]
    fn test_admin_pay_only_after_approval() {
        let admin = identity(Role::Admin, Some(1));
        assert!(admin.can(&kasbon(11, PaymentStatus::Pending), Action::Approve));
        assert!(!admin.can(&kasbon(11, PaymentStatus::Pending), Action::Pay));
        assert_eq!(
            admin.actions_for(&kasbon(11, PaymentStatus::Approve)),
            vec![Action::Pay]
        );
        assert_eq!(
            admin.actions_for(&kasbon(11, PaymentStatus::Paid)),
            vec![Action::Delete]
        );
    }

    #[test]
    fn test_scope_serialization() {
        let json = serde_json::to_string(&Scope::Company(RecordId::from(7))).unwrap();
        assert_eq!(json, r#"{"scope":"company","id":7}"#);
        let json = serde_json::to_string(&Scope::Mine).unwrap();
        assert_eq!(json, r#"{"scope":"mine"}"#);
    }
}
