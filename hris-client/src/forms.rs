//! Role-aware form submission
//!
//! A form's company and employee never come straight from the widgets: the
//! identity decides whether the selector value is used or the caller's own
//! id is forced in. [`prepare`] fills those in from the cascade, validates
//! and hands back a payload ready to send.

use rust_decimal::Decimal;
use shared::amounts::{AmountForm, ClaimAmounts};
use shared::cascade::{CascadeState, DependentKind};
use shared::models::*;
use shared::types::RecordId;
use shared::validation;
use validator::Validate;

use crate::master::MasterData;
use crate::{ClientError, ClientResult};

/// Payloads whose company / dependent ids come from the cascade
pub trait FormPayload: Validate {
    fn set_company(&mut self, company: Option<RecordId>);

    /// Employee the record is for. No-op for forms without one.
    fn set_employee(&mut self, _employee: Option<RecordId>) {}

    /// Other dependent selections (division, location, shift, category)
    fn set_dependent(&mut self, _kind: DependentKind, _id: Option<RecordId>) {}
}

macro_rules! company_and_employee {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FormPayload for $ty {
                fn set_company(&mut self, company: Option<RecordId>) {
                    self.company_id = company;
                }

                fn set_employee(&mut self, employee: Option<RecordId>) {
                    self.employee_id = employee;
                }
            }
        )*
    };
}

company_and_employee!(LeaveCreate, OvertimeCreate, TaskCreate, DocumentCreate, InventoryCreate);

macro_rules! claim_payload {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FormPayload for $ty {
                fn set_company(&mut self, company: Option<RecordId>) {
                    self.company_id = company;
                }

                fn set_employee(&mut self, employee: Option<RecordId>) {
                    self.employee_id = employee;
                }

                fn set_dependent(&mut self, kind: DependentKind, id: Option<RecordId>) {
                    if kind == DependentKind::Category {
                        self.category_id = id;
                    }
                }
            }
        )*
    };
}

claim_payload!(ReimbursementCreate, KasbonCreate);

impl FormPayload for MeetingCreate {
    fn set_company(&mut self, company: Option<RecordId>) {
        self.company_id = company;
    }
}

impl FormPayload for DivisionCreate {
    fn set_company(&mut self, company: Option<RecordId>) {
        self.company_id = company;
    }
}

impl FormPayload for EmployeeCreate {
    fn set_company(&mut self, company: Option<RecordId>) {
        self.company_id = company;
    }

    fn set_dependent(&mut self, kind: DependentKind, id: Option<RecordId>) {
        match kind {
            DependentKind::Division => self.division_id = id,
            DependentKind::Location => self.location_id = id,
            DependentKind::Shift => self.shift_id = id,
            DependentKind::Category | DependentKind::Employee => {}
        }
    }
}

/// Fill in the effective company / employee and dependent selections, then
/// run the required-field checks.
pub fn prepare<P: FormPayload>(
    identity: &Identity,
    cascade: &CascadeState,
    mut payload: P,
) -> ClientResult<P> {
    let company = identity.effective_company(cascade.company());
    if company.is_none() {
        return Err(ClientError::CompanyNotSelected);
    }
    payload.set_company(company);
    for kind in DependentKind::ALL {
        match kind {
            DependentKind::Employee => payload
                .set_employee(identity.effective_employee(cascade.selected(kind))),
            other => payload.set_dependent(other, cascade.selected(other).cloned()),
        }
    }
    validation::check(&payload)?;
    Ok(payload)
}

/// Reimbursement / kasbon form: company cascade plus the amount calculator.
///
/// The category selection drives both the cascade and the calculator so the
/// two never disagree.
#[derive(Debug, Clone)]
pub struct ClaimForm {
    cascade: CascadeState,
    amounts: AmountForm,
}

impl ClaimForm {
    pub fn for_identity(identity: &Identity) -> Self {
        Self {
            cascade: CascadeState::for_identity(identity),
            amounts: AmountForm::new(),
        }
    }

    pub fn cascade(&self) -> &CascadeState {
        &self.cascade
    }

    pub fn amounts(&self) -> &AmountForm {
        &self.amounts
    }

    /// Change company; a real change clears the category and its amounts
    pub fn select_company(&mut self, company: Option<RecordId>) -> bool {
        let changed = self.cascade.select_company(company);
        if changed {
            self.amounts.select_category(None);
        }
        changed
    }

    /// Pick the employee the claim is for, out of those offered under the
    /// current company. Returns `false` when `employee` is not offered.
    pub fn select_employee(&mut self, master: &MasterData, employee: Option<&RecordId>) -> bool {
        master.select(&mut self.cascade, DependentKind::Employee, employee)
    }

    /// Pick a category from the options offered under the current company.
    /// Anything outside those options clears the selection.
    pub fn select_category(&mut self, master: &MasterData, id: Option<&RecordId>) -> bool {
        let accepted = master.select(&mut self.cascade, DependentKind::Category, id);
        let category = self
            .cascade
            .selected(DependentKind::Category)
            .and_then(|id| master.category(id));
        self.amounts.select_category(category);
        accepted
    }

    pub fn set_terpakai(&mut self, raw: impl Into<String>) {
        self.amounts.set_terpakai(raw);
    }

    pub fn total(&self) -> Option<Decimal> {
        self.amounts.total()
    }

    pub fn sisa(&self) -> Option<Decimal> {
        self.amounts.sisa()
    }

    /// Build the payload: scope fields from the cascade, amounts from the
    /// calculator, then validate.
    pub fn build<P: FormPayload + ClaimAmounts>(
        &self,
        identity: &Identity,
        mut payload: P,
    ) -> ClientResult<P> {
        self.amounts.apply_to(&mut payload);
        prepare(identity, &self.cascade, payload)
    }
}
