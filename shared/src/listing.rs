//! List filtering and optimistic delete
//!
//! List screens fetch the whole collection and filter in memory. Deletes are
//! tracked as a pending set on top of the confirmed server list: the row is
//! hidden as soon as the user confirms and only leaves the confirmed list
//! once the server agrees. A failed delete drops the id from the pending set
//! and the row comes back.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::RecordId;

/// A row that can be listed, filtered and deleted
pub trait Listable {
    fn id(&self) -> &RecordId;

    /// Date used by the date-range filter
    fn list_date(&self) -> Option<NaiveDate> {
        None
    }

    /// Text fields searched by the query box
    fn search_text(&self) -> Vec<&str>;
}

/// Client-side list filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub query: String,
}

impl ListFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from(mut self, date: NaiveDate) -> Self {
        self.from = Some(date);
        self
    }

    pub fn to(mut self, date: NaiveDate) -> Self {
        self.to = Some(date);
        self
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none() && self.query.trim().is_empty()
    }

    /// Inclusive date range. Undated rows fail as soon as any bound is set.
    pub fn matches_date(&self, date: Option<NaiveDate>) -> bool {
        if self.from.is_none() && self.to.is_none() {
            return true;
        }
        let Some(date) = date else {
            return false;
        };
        self.from.is_none_or(|from| from <= date) && self.to.is_none_or(|to| date <= to)
    }

    /// Case-insensitive substring over any of `fields`
    pub fn matches_text(&self, fields: &[&str]) -> bool {
        let needle = self.query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        fields
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    /// Both predicates, ANDed
    pub fn matches<T: Listable>(&self, item: &T) -> bool {
        self.matches_date(item.list_date()) && self.matches_text(&item.search_text())
    }

    pub fn apply<'a, T: Listable>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(*item)).collect()
    }
}

/// Errors from the delete flow
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeleteFlowError {
    #[error("no delete awaiting confirmation")]
    NothingToConfirm,
    #[error("record {0} is not in the list")]
    NotListed(RecordId),
    #[error("record {0} is already being deleted")]
    AlreadyPending(RecordId),
}

/// Confirmed server rows plus the deletes still in flight
#[derive(Debug, Clone)]
pub struct PendingList<T> {
    confirmed: Vec<T>,
    pending_delete: HashSet<RecordId>,
    confirming: Option<RecordId>,
}

impl<T> Default for PendingList<T> {
    fn default() -> Self {
        Self {
            confirmed: Vec::new(),
            pending_delete: HashSet::new(),
            confirming: None,
        }
    }
}

impl<T: Listable> PendingList<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            confirmed: items,
            ..Self::default()
        }
    }

    /// Replace the confirmed rows after a re-fetch.
    ///
    /// In-flight deletes stay hidden.
    pub fn replace(&mut self, items: Vec<T>) {
        self.confirmed = items;
    }

    /// Rows currently shown, before filtering
    pub fn visible(&self) -> Vec<&T> {
        self.confirmed
            .iter()
            .filter(|item| !self.pending_delete.contains(item.id()))
            .collect()
    }

    /// Rows currently shown, filtered
    pub fn filtered(&self, filter: &ListFilter) -> Vec<&T> {
        self.visible()
            .into_iter()
            .filter(|item| filter.matches(*item))
            .collect()
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.visible().iter().any(|item| item.id() == id)
    }

    pub fn len(&self) -> usize {
        self.visible().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_pending(&self, id: &RecordId) -> bool {
        self.pending_delete.contains(id)
    }

    /// First step: open the confirmation for `id`
    pub fn ask_delete(&mut self, id: &RecordId) -> Result<(), DeleteFlowError> {
        if self.pending_delete.contains(id) {
            return Err(DeleteFlowError::AlreadyPending(id.clone()));
        }
        if !self.confirmed.iter().any(|item| item.id() == id) {
            return Err(DeleteFlowError::NotListed(id.clone()));
        }
        self.confirming = Some(id.clone());
        Ok(())
    }

    /// Id awaiting confirmation
    pub fn confirming(&self) -> Option<&RecordId> {
        self.confirming.as_ref()
    }

    /// Dismiss the confirmation without deleting
    pub fn cancel_delete(&mut self) {
        self.confirming = None;
    }

    /// Second step: the user confirmed. The row is hidden immediately and
    /// the returned id should be sent to the server.
    pub fn confirm_delete(&mut self) -> Result<RecordId, DeleteFlowError> {
        let id = self
            .confirming
            .take()
            .ok_or(DeleteFlowError::NothingToConfirm)?;
        self.pending_delete.insert(id.clone());
        Ok(id)
    }

    /// Server accepted the delete
    pub fn delete_succeeded(&mut self, id: &RecordId) {
        self.pending_delete.remove(id);
        self.confirmed.retain(|item| item.id() != id);
    }

    /// Server rejected the delete; the row reappears
    pub fn delete_failed(&mut self, id: &RecordId) {
        self.pending_delete.remove(id);
    }
}
