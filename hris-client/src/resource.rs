//! Typed REST resources
//!
//! Each resource is a unit type naming its endpoint and record types. The
//! generic calls below turn a [`Scope`] into the right URL: `All` is the bare
//! collection, `Company` adds `?company_id=`, `Mine` appends `/me`.

use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::access::{Action, Scope};
use shared::models::*;
use shared::response::{DataEnvelope, ListEnvelope, MutationResponse};
use shared::types::RecordId;
use validator::Validate;

use crate::http::{FilePart, HttpClient, MultipartPayload};
use crate::ClientResult;

/// Face enrollment endpoint
pub const FACE_ENDPOINT: &str = "face";

/// A REST collection
pub trait Resource: Send + Sync + 'static {
    type Record: DeserializeOwned + Send + Sync;

    /// Path relative to the API base URL
    const ENDPOINT: &'static str;

    /// Name used on the command line
    const NAME: &'static str;
}

/// A collection that accepts new records
pub trait Creatable: Resource {
    type Create: Serialize + Validate + Send + Sync;
}

/// Wire value of a status change, for resources that have one
pub trait Reviewable: Resource {
    fn status_for(action: Action) -> Option<&'static str>;
}

macro_rules! resource {
    ($name:ident, $record:ty, $endpoint:literal, $cli:literal) => {
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl Resource for $name {
            type Record = $record;
            const ENDPOINT: &'static str = $endpoint;
            const NAME: &'static str = $cli;
        }
    };
    ($name:ident, $record:ty, $create:ty, $endpoint:literal, $cli:literal) => {
        resource!($name, $record, $endpoint, $cli);

        impl Creatable for $name {
            type Create = $create;
        }
    };
}

resource!(Companies, Company, "companies", "companies");
resource!(Divisions, Division, DivisionCreate, "divisions", "divisions");
resource!(Locations, Location, "locations", "locations");
resource!(Shifts, ShiftDefinition, "shifts", "shifts");
resource!(Categories, ExpenseCategory, "categories", "categories");
resource!(Employees, Employee, EmployeeCreate, "employees", "employees");
resource!(Leaves, LeaveRequest, LeaveCreate, "cuti", "leave");
resource!(Overtimes, Overtime, OvertimeCreate, "lembur", "overtime");
resource!(Reimbursements, Reimbursement, ReimbursementCreate, "reimbursement", "reimbursement");
resource!(Kasbons, Kasbon, KasbonCreate, "kasbon", "kasbon");
resource!(Attendance, AttendanceEvent, "absensi", "attendance");
resource!(Visits, Visit, "dinas-luar", "visit");
resource!(Meetings, Meeting, MeetingCreate, "rapat", "meeting");
resource!(Tasks, Task, TaskCreate, "tugas", "task");
resource!(Documents, Document, DocumentCreate, "dokumen", "document");
resource!(Inventory, InventoryItem, InventoryCreate, "inventaris", "inventory");

fn approval_status(action: Action) -> Option<&'static str> {
    match action {
        Action::Approve => Some("approve"),
        Action::Reject => Some("reject"),
        _ => None,
    }
}

fn payment_status(action: Action) -> Option<&'static str> {
    match action {
        Action::Pay => Some("paid"),
        other => approval_status(other),
    }
}

impl Reviewable for Leaves {
    fn status_for(action: Action) -> Option<&'static str> {
        approval_status(action)
    }
}

impl Reviewable for Overtimes {
    fn status_for(action: Action) -> Option<&'static str> {
        approval_status(action)
    }
}

impl Reviewable for Visits {
    fn status_for(action: Action) -> Option<&'static str> {
        approval_status(action)
    }
}

impl Reviewable for Documents {
    fn status_for(action: Action) -> Option<&'static str> {
        approval_status(action)
    }
}

impl Reviewable for Reimbursements {
    fn status_for(action: Action) -> Option<&'static str> {
        payment_status(action)
    }
}

impl Reviewable for Kasbons {
    fn status_for(action: Action) -> Option<&'static str> {
        payment_status(action)
    }
}

/// Collection path and query for `scope`
pub fn collection_path(endpoint: &str, scope: &Scope) -> (String, Option<(&'static str, String)>) {
    match scope {
        Scope::All => (endpoint.to_string(), None),
        Scope::Company(id) => (endpoint.to_string(), Some(("company_id", id.to_string()))),
        Scope::Mine => (format!("{endpoint}/me"), None),
    }
}

pub fn record_path(endpoint: &str, id: &RecordId) -> String {
    format!("{endpoint}/{id}")
}

/// Fetch the whole collection for `scope`
pub async fn fetch_list<R: Resource, C: HttpClient>(
    http: &C,
    scope: &Scope,
) -> ClientResult<Vec<R::Record>> {
    let (path, query) = collection_path(R::ENDPOINT, scope);
    let envelope: ListEnvelope<R::Record> = match &query {
        Some((key, value)) => http.get_query(&path, &[(*key, value.as_str())]).await?,
        None => http.get(&path).await?,
    };
    let items = envelope.into_vec();
    tracing::debug!(resource = R::NAME, count = items.len(), "list fetched");
    Ok(items)
}

/// Fetch one record (`{data: {...}}`)
pub async fn fetch_one<R: Resource, C: HttpClient>(
    http: &C,
    id: &RecordId,
) -> ClientResult<R::Record> {
    let envelope: DataEnvelope<R::Record> = http.get(&record_path(R::ENDPOINT, id)).await?;
    Ok(envelope.data)
}

pub async fn create<R: Creatable, C: HttpClient>(
    http: &C,
    payload: &R::Create,
) -> ClientResult<MutationResponse> {
    let response: Option<MutationResponse> = http.post(R::ENDPOINT, payload).await?;
    tracing::info!(resource = R::NAME, "record created");
    Ok(response.unwrap_or_default())
}

/// Create with file parts (multipart)
pub async fn create_with_files<R: Creatable, C: HttpClient>(
    http: &C,
    payload: &R::Create,
    files: Vec<FilePart>,
) -> ClientResult<MutationResponse> {
    let body = files
        .into_iter()
        .fold(MultipartPayload::from_serialize(payload)?, MultipartPayload::part);
    let response: Option<MutationResponse> = http.post_multipart(R::ENDPOINT, body).await?;
    tracing::info!(resource = R::NAME, "record created");
    Ok(response.unwrap_or_default())
}

pub async fn update<R: Creatable, C: HttpClient>(
    http: &C,
    id: &RecordId,
    payload: &R::Create,
) -> ClientResult<MutationResponse> {
    let response: Option<MutationResponse> =
        http.put(&record_path(R::ENDPOINT, id), payload).await?;
    tracing::info!(resource = R::NAME, %id, "record updated");
    Ok(response.unwrap_or_default())
}

/// Update with file parts: `POST` + `_method=PUT`
pub async fn update_with_files<R: Creatable, C: HttpClient>(
    http: &C,
    id: &RecordId,
    payload: &R::Create,
    files: Vec<FilePart>,
) -> ClientResult<MutationResponse> {
    let body = files
        .into_iter()
        .fold(MultipartPayload::from_serialize(payload)?, MultipartPayload::part)
        .method_put();
    let response: Option<MutationResponse> = http
        .post_multipart(&record_path(R::ENDPOINT, id), body)
        .await?;
    tracing::info!(resource = R::NAME, %id, "record updated");
    Ok(response.unwrap_or_default())
}

pub async fn delete<R: Resource, C: HttpClient>(http: &C, id: &RecordId) -> ClientResult<()> {
    http.delete(&record_path(R::ENDPOINT, id)).await?;
    tracing::info!(resource = R::NAME, %id, "record deleted");
    Ok(())
}

/// Send a status change (`{status: ...}`) for `action`
pub async fn set_status<R: Reviewable, C: HttpClient>(
    http: &C,
    id: &RecordId,
    action: Action,
) -> ClientResult<MutationResponse> {
    let Some(status) = R::status_for(action) else {
        return Err(crate::ClientError::NotAllowed(action));
    };
    let body = serde_json::json!({ "status": status });
    let response: Option<MutationResponse> =
        http.put(&record_path(R::ENDPOINT, id), &body).await?;
    tracing::info!(resource = R::NAME, %id, status, "status changed");
    Ok(response.unwrap_or_default())
}
