//! Derived amounts for category-capped claims
//!
//! Reimbursement and kasbon forms copy the selected category's fixed
//! `jumlah` and derive `total = sisa = max(jumlah - terpakai, 0)`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::ExpenseCategory;
use crate::types::RecordId;

/// Read-only outputs of the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedAmounts {
    pub total: Decimal,
    pub sisa: Decimal,
}

/// Compute the derived pair. Never negative.
pub fn derive_amounts(category_amount: Decimal, used: Decimal) -> DerivedAmounts {
    // Saturate on overflow
    let remaining = category_amount
        .checked_sub(used)
        .unwrap_or(if used.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::ZERO
        })
        .max(Decimal::ZERO);
    DerivedAmounts {
        total: remaining,
        sisa: remaining,
    }
}

/// Parse the user-typed "amount used".
///
/// Lenient on purpose: blank, unparsable and negative input all count as 0,
/// so a malformed value yields the full category amount instead of an error.
pub fn parse_used(raw: &str) -> Decimal {
    let raw = raw.trim();
    if raw.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map(|value| value.max(Decimal::ZERO))
        .unwrap_or(Decimal::ZERO)
}

/// Payload types that carry the claim amounts
pub trait ClaimAmounts {
    fn apply_amounts(
        &mut self,
        jumlah: Option<Decimal>,
        terpakai: Decimal,
        derived: Option<DerivedAmounts>,
    );
}

/// Live calculator state for one claim form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AmountForm {
    category: Option<(RecordId, Decimal)>,
    terpakai_input: String,
    derived: Option<DerivedAmounts>,
}

impl AmountForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select (or clear) the category.
    ///
    /// The typed `terpakai` is kept across category changes and the derived
    /// fields are recomputed against the new cap.
    pub fn select_category(&mut self, category: Option<&ExpenseCategory>) {
        self.category = category.map(|c| (c.id.clone(), c.jumlah));
        self.recompute();
    }

    /// Update the "amount used" input
    pub fn set_terpakai(&mut self, raw: impl Into<String>) {
        self.terpakai_input = raw.into();
        self.recompute();
    }

    fn recompute(&mut self) {
        self.derived = self
            .category
            .as_ref()
            .map(|(_, jumlah)| derive_amounts(*jumlah, self.used()));
    }

    pub fn category_id(&self) -> Option<&RecordId> {
        self.category.as_ref().map(|(id, _)| id)
    }

    /// Category cap, empty without a category
    pub fn jumlah(&self) -> Option<Decimal> {
        self.category.as_ref().map(|(_, jumlah)| *jumlah)
    }

    /// Raw input as typed
    pub fn terpakai_input(&self) -> &str {
        &self.terpakai_input
    }

    /// Parsed amount used
    pub fn used(&self) -> Decimal {
        parse_used(&self.terpakai_input)
    }

    pub fn total(&self) -> Option<Decimal> {
        self.derived.map(|d| d.total)
    }

    pub fn sisa(&self) -> Option<Decimal> {
        self.derived.map(|d| d.sisa)
    }

    pub fn derived(&self) -> Option<DerivedAmounts> {
        self.derived
    }

    /// Copy the current amounts into a payload
    pub fn apply_to<P: ClaimAmounts>(&self, payload: &mut P) {
        payload.apply_amounts(self.jumlah(), self.used(), self.derived);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::KasbonCreate;

    fn category(id: i64, jumlah: i64) -> ExpenseCategory {
        ExpenseCategory {
            id: RecordId::from(id),
            name: format!("Kategori {id}"),
            company_id: Some(RecordId::from(1)),
            jumlah: Decimal::from(jumlah),
        }
    }

    #[test]
    fn test_derive_never_negative() {
        let d = derive_amounts(Decimal::from(100), Decimal::from(250));
        assert_eq!(d.total, Decimal::ZERO);
        assert_eq!(d.sisa, Decimal::ZERO);

        let d = derive_amounts(Decimal::from(500_000), Decimal::from(150_000));
        assert_eq!(d.total, Decimal::from(350_000));
        assert_eq!(d.total, d.sisa);
    }

    #[test]
    fn test_derive_saturates_at_extremes() {
        let d = derive_amounts(Decimal::MIN, Decimal::ONE);
        assert_eq!(d.total, Decimal::ZERO);

        let d = derive_amounts(Decimal::MAX, -Decimal::ONE);
        assert_eq!(d.sisa, Decimal::MAX);

        let huge = parse_used("79228162514264337593543950335");
        assert_eq!(derive_amounts(Decimal::from(100), huge).total, Decimal::ZERO);
    }

    #[test]
    fn test_parse_used_is_lenient() {
        assert_eq!(parse_used(""), Decimal::ZERO);
        assert_eq!(parse_used("   "), Decimal::ZERO);
        assert_eq!(parse_used("abc"), Decimal::ZERO);
        assert_eq!(parse_used("-500"), Decimal::ZERO);
        assert_eq!(parse_used(" 150000 "), Decimal::from(150_000));
        assert_eq!(parse_used("1e3"), Decimal::from(1_000));
        assert_eq!(parse_used("12.5"), Decimal::new(125, 1));
    }

    #[test]
    fn test_no_category_resets_fields() {
        let mut form = AmountForm::new();
        form.set_terpakai("1000");
        assert_eq!(form.total(), None);
        assert_eq!(form.sisa(), None);
        assert_eq!(form.jumlah(), None);

        form.select_category(Some(&category(5, 5000)));
        assert_eq!(form.total(), Some(Decimal::from(4000)));

        form.select_category(None);
        assert_eq!(form.total(), None);
        assert_eq!(form.sisa(), None);
        assert_eq!(form.terpakai_input(), "1000");
    }

    #[test]
    fn test_category_change_keeps_terpakai() {
        let mut form = AmountForm::new();
        form.select_category(Some(&category(5, 500_000)));
        form.set_terpakai("150000");
        assert_eq!(form.total(), Some(Decimal::from(350_000)));
        assert_eq!(form.sisa(), Some(Decimal::from(350_000)));

        form.select_category(Some(&category(6, 200_000)));
        assert_eq!(form.category_id(), Some(&RecordId::from(6)));
        assert_eq!(form.total(), Some(Decimal::from(50_000)));
        assert_eq!(form.sisa(), Some(Decimal::from(50_000)));
    }

    #[test]
    fn test_malformed_terpakai_yields_full_amount() {
        let mut form = AmountForm::new();
        form.select_category(Some(&category(5, 300)));
        form.set_terpakai("tiga ratus");
        assert_eq!(form.total(), Some(Decimal::from(300)));
    }

    #[test]
    fn test_apply_to_payload() {
        let mut form = AmountForm::new();
        form.select_category(Some(&category(5, 1000)));
        form.set_terpakai("400");

        let mut payload = KasbonCreate::default();
        form.apply_to(&mut payload);
        assert_eq!(payload.jumlah, Some(Decimal::from(1000)));
        assert_eq!(payload.terpakai, Decimal::from(400));
        assert_eq!(payload.total, Some(Decimal::from(600)));
        assert_eq!(payload.sisa, Some(Decimal::from(600)));
    }
}
