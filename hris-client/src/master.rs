//! Master data for form cascades
//!
//! Every form that picks a company, division, location, shift, category or
//! employee loads the six collections at once. The loads are independent: a
//! failure leaves that one collection empty ("no options") and is logged,
//! the others still arrive. Nothing is retried.

use shared::access::Scope;
use shared::cascade::{CascadeState, CompanyOwned, DependentKind};
use shared::models::{
    Company, Division, Employee, ExpenseCategory, Identity, Location, Role, ShiftDefinition,
};
use shared::types::RecordId;

use crate::http::HttpClient;
use crate::resource::{
    Categories, Companies, Divisions, Employees, Locations, Resource, Shifts, fetch_list,
};

/// Selectable option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionItem {
    pub id: RecordId,
    pub label: String,
}

impl OptionItem {
    fn of<T: CompanyOwned>(record: &T) -> Self {
        Self {
            id: record.record_id().clone(),
            label: record.label().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MasterData {
    pub companies: Vec<Company>,
    pub divisions: Vec<Division>,
    pub locations: Vec<Location>,
    pub shifts: Vec<ShiftDefinition>,
    pub categories: Vec<ExpenseCategory>,
    pub employees: Vec<Employee>,
}

/// Scope master data is fetched with: staff pinned to a company get that
/// company's records, superadmin gets everything.
pub fn master_scope(identity: &Identity) -> Scope {
    match (&identity.role, &identity.company_id) {
        (Role::SuperAdmin, _) | (_, None) => Scope::All,
        (_, Some(company)) => Scope::Company(company.clone()),
    }
}

async fn fetch_or_empty<R: Resource, C: HttpClient>(http: &C, scope: &Scope) -> Vec<R::Record> {
    match fetch_list::<R, C>(http, scope).await {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(resource = R::NAME, error = %e, "master data unavailable, showing no options");
            Vec::new()
        }
    }
}

impl MasterData {
    /// Load all six collections concurrently (all-settle)
    pub async fn load<C: HttpClient>(http: &C, identity: &Identity) -> Self {
        let scope = master_scope(identity);
        let (companies, divisions, locations, shifts, categories, employees) = futures::join!(
            fetch_or_empty::<Companies, C>(http, &Scope::All),
            fetch_or_empty::<Divisions, C>(http, &scope),
            fetch_or_empty::<Locations, C>(http, &scope),
            fetch_or_empty::<Shifts, C>(http, &scope),
            fetch_or_empty::<Categories, C>(http, &scope),
            fetch_or_empty::<Employees, C>(http, &scope),
        );
        Self {
            companies,
            divisions,
            locations,
            shifts,
            categories,
            employees,
        }
    }

    /// Company options; only meaningful while the selector is visible
    pub fn company_options(&self, cascade: &CascadeState) -> Vec<OptionItem> {
        if !cascade.company_selector_visible() {
            return Vec::new();
        }
        self.companies
            .iter()
            .map(|c| OptionItem {
                id: c.id.clone(),
                label: c.name.clone(),
            })
            .collect()
    }

    /// Options for `kind` under the cascade's current company
    pub fn options(&self, cascade: &CascadeState, kind: DependentKind) -> Vec<OptionItem> {
        match kind {
            DependentKind::Division => collect(cascade.options(kind, &self.divisions)),
            DependentKind::Location => collect(cascade.options(kind, &self.locations)),
            DependentKind::Shift => collect(cascade.options(kind, &self.shifts)),
            DependentKind::Category => collect(cascade.options(kind, &self.categories)),
            DependentKind::Employee => collect(cascade.options(kind, &self.employees)),
        }
    }

    /// Select `id` for `kind` in `cascade`, accepted only when it is among
    /// the options for the current company.
    pub fn select(
        &self,
        cascade: &mut CascadeState,
        kind: DependentKind,
        id: Option<&RecordId>,
    ) -> bool {
        match kind {
            DependentKind::Division => cascade.select(kind, &self.divisions, id),
            DependentKind::Location => cascade.select(kind, &self.locations, id),
            DependentKind::Shift => cascade.select(kind, &self.shifts, id),
            DependentKind::Category => cascade.select(kind, &self.categories, id),
            DependentKind::Employee => cascade.select(kind, &self.employees, id),
        }
    }

    /// Drop selections that are no longer offered. Returns `true` if any was.
    pub fn prune(&self, cascade: &mut CascadeState) -> bool {
        let mut changed = false;
        changed |= cascade.prune(DependentKind::Division, &self.divisions);
        changed |= cascade.prune(DependentKind::Location, &self.locations);
        changed |= cascade.prune(DependentKind::Shift, &self.shifts);
        changed |= cascade.prune(DependentKind::Category, &self.categories);
        changed |= cascade.prune(DependentKind::Employee, &self.employees);
        changed
    }

    pub fn category(&self, id: &RecordId) -> Option<&ExpenseCategory> {
        self.categories.iter().find(|c| &c.id == id)
    }
}

fn collect<T: CompanyOwned>(records: Vec<&T>) -> Vec<OptionItem> {
    records.into_iter().map(OptionItem::of).collect()
}
