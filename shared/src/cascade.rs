//! Master-data cascade
//!
//! Company is the parent of every dependent master record (division,
//! location, shift, expense category, employee). A dependent is selectable
//! only when its `company_id` equals the effective company, and a child
//! selection never outlives a change of parent.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Identity, Role};
use crate::types::RecordId;

/// A master record owned by a company
pub trait CompanyOwned {
    fn record_id(&self) -> &RecordId;
    fn owner_company(&self) -> Option<&RecordId>;
    fn label(&self) -> &str;
}

/// Dependent master-data kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependentKind {
    Division,
    Location,
    Shift,
    Category,
    Employee,
}

impl DependentKind {
    pub const ALL: [DependentKind; 5] = [
        DependentKind::Division,
        DependentKind::Location,
        DependentKind::Shift,
        DependentKind::Category,
        DependentKind::Employee,
    ];
}

/// Records whose company equals `parent`.
///
/// No parent means nothing is selectable yet.
pub fn resolve<'a, T: CompanyOwned>(records: &'a [T], parent: Option<&RecordId>) -> Vec<&'a T> {
    let Some(parent) = parent else {
        return Vec::new();
    };
    records
        .iter()
        .filter(|record| record.owner_company() == Some(parent))
        .collect()
}

/// Selection state of one form's company cascade
#[derive(Debug, Clone)]
pub struct CascadeState {
    role: Role,
    self_id: RecordId,
    company: Option<RecordId>,
    selections: HashMap<DependentKind, RecordId>,
}

impl CascadeState {
    /// Initial state for a form opened by `identity`.
    ///
    /// Admin and pegawai start (and stay) on their own company.
    pub fn for_identity(identity: &Identity) -> Self {
        let mut state = Self {
            role: identity.role,
            self_id: identity.id.clone(),
            company: identity.effective_company(None),
            selections: HashMap::new(),
        };
        if identity.role == Role::Pegawai {
            state
                .selections
                .insert(DependentKind::Employee, identity.id.clone());
        }
        state
    }

    /// Effective parent
    pub fn company(&self) -> Option<&RecordId> {
        self.company.as_ref()
    }

    /// Whether the company selector is rendered
    pub fn company_selector_visible(&self) -> bool {
        self.role.can_see_company_selector()
    }

    /// Change the parent.
    ///
    /// Ignored unless the company selector is visible. Returns `true` when
    /// the parent actually changed, in which case every child selection is
    /// cleared.
    pub fn select_company(&mut self, company: Option<RecordId>) -> bool {
        if !self.company_selector_visible() {
            tracing::debug!(role = %self.role, "company selection ignored for pinned role");
            return false;
        }
        let company = company.filter(|id| !id.is_empty());
        if company == self.company {
            return false;
        }
        self.company = company;
        self.selections.clear();
        true
    }

    /// Select a dependent record out of `records`.
    ///
    /// Only ids offered under the current parent are accepted; anything else
    /// clears the selection and returns `false`. `None` clears it. Pegawai
    /// cannot move the employee selection.
    pub fn select<T: CompanyOwned>(
        &mut self,
        kind: DependentKind,
        records: &[T],
        id: Option<&RecordId>,
    ) -> bool {
        if kind == DependentKind::Employee && self.role == Role::Pegawai {
            return id.is_none_or(|id| id == &self.self_id);
        }
        let Some(id) = id.filter(|id| !id.is_empty()) else {
            self.selections.remove(&kind);
            return true;
        };
        let offered = self
            .options(kind, records)
            .into_iter()
            .any(|record| record.record_id() == id);
        if offered {
            self.selections.insert(kind, id.clone());
        } else {
            tracing::debug!(?kind, %id, "selection not offered under current company");
            self.selections.remove(&kind);
        }
        offered
    }

    pub fn selected(&self, kind: DependentKind) -> Option<&RecordId> {
        self.selections.get(&kind)
    }

    /// Options for `kind` under the current parent.
    ///
    /// Pegawai sees only its own employee record.
    pub fn options<'a, T: CompanyOwned>(&self, kind: DependentKind, records: &'a [T]) -> Vec<&'a T> {
        let resolved = resolve(records, self.company.as_ref());
        if kind == DependentKind::Employee && self.role == Role::Pegawai {
            return resolved
                .into_iter()
                .filter(|record| record.record_id() == &self.self_id)
                .collect();
        }
        resolved
    }

    /// Drop the `kind` selection if it is no longer among `records` under the
    /// current parent. Returns `true` when something was cleared.
    pub fn prune<T: CompanyOwned>(&mut self, kind: DependentKind, records: &[T]) -> bool {
        let Some(selected) = self.selections.get(&kind) else {
            return false;
        };
        let still_valid = self
            .options(kind, records)
            .iter()
            .any(|record| record.record_id() == selected);
        if !still_valid {
            self.selections.remove(&kind);
        }
        !still_valid
    }
}
