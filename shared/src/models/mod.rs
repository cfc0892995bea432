//! Data models
//!
//! Mirrors the JSON the HR backend returns. All ids are [`RecordId`] so that
//! `1` and `"1"` compare equal; every foreign key is optional because the
//! backend omits or nulls them freely.
//!
//! [`RecordId`]: crate::types::RecordId

pub mod agenda;
pub mod attendance;
pub mod category;
pub mod claim;
pub mod company;
pub mod division;
pub mod employee;
pub mod leave;
pub mod location;
pub mod records;
pub mod role;
pub mod shift;
pub mod status;

// Re-exports
pub use agenda::*;
pub use attendance::*;
pub use category::*;
pub use claim::*;
pub use company::*;
pub use division::*;
pub use employee::*;
pub use leave::*;
pub use location::*;
pub use records::*;
pub use role::*;
pub use shift::*;
pub use status::*;

use crate::access::Stage;
use crate::listing::Listable;
use crate::types::RecordId;

/// A record created by (or assigned to) one employee that moves through a
/// status lifecycle.
pub trait Transaction: Listable {
    /// Owning / assigned employee
    fn owner_id(&self) -> Option<&RecordId>;

    /// Lifecycle stage derived from the record's status
    fn stage(&self) -> Stage;
}
