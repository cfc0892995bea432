//! Error codes shared by the client crates
//!
//! - [`ErrorCode`]: Standardized numeric codes for every failure the client surfaces
//! - [`ErrorCategory`]: Classification of codes by range
//!
//! # Example
//!
//! ```
//! use shared::error::{ErrorCategory, ErrorCode};
//!
//! let code = ErrorCode::from_http_status(403);
//! assert_eq!(code, ErrorCode::PermissionDenied);
//! assert_eq!(code.category(), ErrorCategory::Permission);
//! ```

mod category;
mod codes;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
