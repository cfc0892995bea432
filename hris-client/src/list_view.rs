//! List screen state
//!
//! Fetches the whole collection for the caller's scope, filters it in
//! memory and runs the two-step delete with rollback on failure.

use std::marker::PhantomData;

use shared::access::Scope;
use shared::listing::{ListFilter, Listable, PendingList};
use shared::types::RecordId;

use crate::alert::Alert;
use crate::http::HttpClient;
use crate::resource::{self, Resource};
use crate::ClientResult;

pub const DELETE_SUCCESS: &str = "Data deleted";

pub struct ListView<R: Resource>
where
    R::Record: Listable,
{
    scope: Scope,
    items: PendingList<R::Record>,
    filter: ListFilter,
    _resource: PhantomData<R>,
}

impl<R: Resource> ListView<R>
where
    R::Record: Listable,
{
    pub fn new(scope: Scope) -> Self {
        Self {
            scope,
            items: PendingList::default(),
            filter: ListFilter::default(),
            _resource: PhantomData,
        }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Re-fetch the collection. Returns the number of rows received.
    pub async fn refresh<C: HttpClient>(&mut self, http: &C) -> ClientResult<usize> {
        let items = resource::fetch_list::<R, C>(http, &self.scope).await?;
        let count = items.len();
        self.items.replace(items);
        Ok(count)
    }

    pub fn set_filter(&mut self, filter: ListFilter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> &ListFilter {
        &self.filter
    }

    /// Rows shown: confirmed, not pending delete, matching the filter
    pub fn rows(&self) -> Vec<&R::Record> {
        self.items.filtered(&self.filter)
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.items.contains(id)
    }

    /// Open the delete confirmation for `id`
    pub fn ask_delete(&mut self, id: &RecordId) -> ClientResult<()> {
        self.items.ask_delete(id)?;
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.items.cancel_delete();
    }

    /// Confirm the pending delete: the row disappears at once. Returns the id
    /// to send to the server.
    pub fn begin_delete(&mut self) -> ClientResult<RecordId> {
        Ok(self.items.confirm_delete()?)
    }

    /// Apply the server's answer. A failure puts the row back.
    pub fn finish_delete(&mut self, id: &RecordId, result: &ClientResult<()>) -> Alert {
        match result {
            Ok(()) => {
                self.items.delete_succeeded(id);
                Alert::success(DELETE_SUCCESS)
            }
            Err(e) => {
                self.items.delete_failed(id);
                tracing::warn!(resource = R::NAME, %id, error = %e, "delete failed, row restored");
                Alert::failure(e)
            }
        }
    }

    /// Confirm and send the delete in one go
    pub async fn confirm_delete<C: HttpClient>(&mut self, http: &C) -> Alert {
        let id = match self.begin_delete() {
            Ok(id) => id,
            Err(e) => return Alert::failure(&e),
        };
        let result = resource::delete::<R, C>(http, &id).await;
        self.finish_delete(&id, &result)
    }
}
