//! HRIS Client - REST client and form flows for the HR API
//!
//! Wraps the HR backend with typed resources, the persisted login session,
//! camera capture for face enrollment and attendance punches, and the list
//! and form state the screens drive.

pub mod alert;
pub mod capture;
pub mod config;
pub mod error;
pub mod forms;
pub mod http;
pub mod list_view;
pub mod logger;
pub mod master;
pub mod resource;
pub mod session;

pub use alert::{Alert, AlertKind};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, MultipartPayload, NetworkHttpClient};
pub use list_view::ListView;
pub use master::MasterData;
pub use session::{FileSessionStore, Session, SessionStore};

// Re-export shared types for convenience
pub use shared::models::{Identity, Role};
pub use shared::types::RecordId;
