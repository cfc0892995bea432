//! Per-field validation messages
//!
//! Forms are checked with `validator` before anything is sent. The result is
//! flattened into field name → messages so the UI can render them inline.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// Key used for errors that belong to the whole form (cross-field checks)
pub const FORM_LEVEL: &str = "__all__";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{}", self.summary())]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// First message for `field`
    pub fn first(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(|m| m.first()).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// `field: message` pairs joined with `; `
    pub fn summary(&self) -> String {
        self.0
            .iter()
            .flat_map(|(field, messages)| messages.iter().map(move |m| format!("{field}: {m}")))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// `Ok(())` when empty, otherwise `Err(self)`
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, list) in errors.field_errors() {
            for error in list.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                out.add(field.to_string(), message);
            }
        }
        out
    }
}

/// Run the derived checks and flatten the result
pub fn check<T: Validate>(form: &T) -> Result<(), FieldErrors> {
    form.validate().map_err(FieldErrors::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LeaveCreate;
    use crate::types::RecordId;
    use chrono::NaiveDate;

    #[test]
    fn test_required_fields_flattened() {
        let errors = check(&LeaveCreate::default()).unwrap_err();
        assert_eq!(errors.first("employee_id"), Some("Employee is required"));
        assert_eq!(errors.first("jenis_cuti"), Some("Leave type is required"));
        assert!(errors.contains("tanggal_mulai"));
        assert!(!errors.contains("nonexistent"));
    }

    #[test]
    fn test_cross_field_error_is_form_level() {
        let leave = LeaveCreate {
            employee_id: Some(RecordId::from(1)),
            company_id: Some(RecordId::from(1)),
            jenis_cuti: "tahunan".into(),
            tanggal_mulai: NaiveDate::from_ymd_opt(2025, 3, 10),
            tanggal_selesai: NaiveDate::from_ymd_opt(2025, 3, 1),
            alasan: "Liburan".into(),
        };
        let errors = check(&leave).unwrap_err();
        assert_eq!(
            errors.first(FORM_LEVEL),
            Some("End date must not be before start date")
        );
    }

    #[test]
    fn test_display_and_into_result() {
        assert!(FieldErrors::new().into_result().is_ok());
        let mut errors = FieldErrors::new();
        errors.add("a", "one");
        errors.add("b", "two");
        assert_eq!(errors.to_string(), "a: one; b: two");
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn test_field_errors_is_std_error() {
        let mut errors = FieldErrors::new();
        errors.add("judul", "Title is required");
        let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(errors);
        assert_eq!(boxed.to_string(), "judul: Title is required");
        assert!(boxed.source().is_none());
    }
}
