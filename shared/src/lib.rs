//! Shared types for the HRIS client
//!
//! Domain models, role capabilities, the master-data cascade, the claim
//! amount calculator and list filtering. Everything here is pure; I/O lives
//! in `hris-client`.

pub mod access;
pub mod amounts;
pub mod cascade;
pub mod error;
pub mod listing;
pub mod models;
pub mod response;
pub mod routes;
pub mod types;
pub mod validation;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use access::{Action, Scope, Stage};
pub use amounts::{AmountForm, DerivedAmounts, derive_amounts, parse_used};
pub use cascade::{CascadeState, CompanyOwned, DependentKind, resolve};
pub use error::{ErrorCategory, ErrorCode};
pub use listing::{DeleteFlowError, ListFilter, Listable, PendingList};
pub use routes::{RouteDecision, guard};
pub use types::RecordId;
pub use validation::FieldErrors;
