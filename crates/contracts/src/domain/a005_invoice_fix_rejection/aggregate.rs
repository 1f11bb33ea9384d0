use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::amounts::{InvoiceAmountsDetails, InvoiceTotals, RejectedInvoiceQuery};
use crate::domain::common::{AggregateRoot, BaseAggregate, EntityMetadata};
use crate::enums::InvoiceType;
use crate::shared::errors::{ValidationError, WorkflowError};

crate::uuid_aggregate_id!(
    /// Identifier of a rejection fix record
    InvoiceFixRejectionId
);

/// One line of a rejection fix: the reported amounts plus the corrected ones
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RejectionFixLine {
    pub item: String,
    pub qty: Decimal,
    pub amount_without_taxes: Decimal,
    pub tax_amount: Decimal,
    pub discount_amount: Decimal,
    pub fixed_amount_without_taxes: Decimal,
    pub fixed_tax_amount: Decimal,
    pub fixed_discount_amount: Decimal,
}

/// Editable amount column of a fix line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedAmount {
    WithoutTaxes,
    Tax,
    Discount,
}

impl FixedAmount {
    pub fn apply(&self, line: &mut RejectionFixLine, value: Decimal) {
        match self {
            FixedAmount::WithoutTaxes => line.fixed_amount_without_taxes = value,
            FixedAmount::Tax => line.fixed_tax_amount = value,
            FixedAmount::Discount => line.fixed_discount_amount = value,
        }
    }
}

/// Correction document built from a rejected invoice.
///
/// `totals` and the reported line amounts mirror the source invoice and are
/// never written back to it. Only the `fixed_*` line values and `fix_reason`
/// are edited; `fixed_totals` always follows the line corrections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionFixDraft {
    pub invoice_type: InvoiceType,
    pub invoice: Option<String>,
    pub totals: InvoiceTotals,
    pub fixed_totals: InvoiceTotals,
    pub items: Vec<RejectionFixLine>,
    #[serde(default)]
    pub fix_reason: String,
}

impl RejectionFixDraft {
    pub fn new(invoice_type: InvoiceType) -> Self {
        Self {
            invoice_type,
            invoice: None,
            totals: InvoiceTotals::default(),
            fixed_totals: InvoiceTotals::default(),
            items: Vec::new(),
            fix_reason: String::new(),
        }
    }

    /// Query whose results the invoice field may take
    pub fn invoice_query(&self) -> RejectedInvoiceQuery {
        RejectedInvoiceQuery::new(self.invoice_type)
    }

    /// Applies an invoice type change and returns the recomputed query
    pub fn change_invoice_type(&mut self, invoice_type: InvoiceType) -> RejectedInvoiceQuery {
        self.invoice_type = invoice_type;
        self.invoice_query()
    }

    /// Applies an invoice change. Amounts of a previous invoice are dropped
    /// and stay empty until [`Self::apply_amounts`] receives the new ones.
    pub fn select_invoice(&mut self, invoice: Option<String>) {
        let invoice = invoice.filter(|i| !i.trim().is_empty());
        if invoice != self.invoice {
            self.clear_amounts();
        }
        self.invoice = invoice;
    }

    fn clear_amounts(&mut self) {
        self.totals = InvoiceTotals::default();
        self.fixed_totals = InvoiceTotals::default();
        self.items.clear();
    }

    /// Overwrites totals and lines with the source invoice's amounts,
    /// one line per source line in source order. Corrected amounts start
    /// equal to the reported ones.
    pub fn apply_amounts(&mut self, details: &InvoiceAmountsDetails) {
        self.totals = details.totals;
        self.fixed_totals = details.totals;
        self.items = details
            .items
            .iter()
            .map(|line| RejectionFixLine {
                item: line.item_code.clone(),
                qty: line.qty,
                amount_without_taxes: line.amount_without_taxes,
                tax_amount: line.tax_amount,
                discount_amount: line.discount_amount,
                fixed_amount_without_taxes: line.amount_without_taxes,
                fixed_tax_amount: line.tax_amount,
                fixed_discount_amount: line.discount_amount,
            })
            .collect();
    }

    /// Sets one corrected amount and recomputes the fixed totals
    pub fn set_fixed_amount(&mut self, index: usize, column: FixedAmount, value: Decimal) -> bool {
        let Some(line) = self.items.get_mut(index) else {
            return false;
        };
        column.apply(line, value);
        self.recompute_fixed_totals();
        true
    }

    /// Reported totals shifted by the sum of the line corrections
    pub fn recompute_fixed_totals(&mut self) {
        let (mut net, mut tax, mut discount) = (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO);
        for line in &self.items {
            net += line.fixed_amount_without_taxes - line.amount_without_taxes;
            tax += line.fixed_tax_amount - line.tax_amount;
            discount += line.fixed_discount_amount - line.discount_amount;
        }
        let reported = self.totals;
        self.fixed_totals = InvoiceTotals {
            amount_without_taxes_and_discount: reported.amount_without_taxes_and_discount + net,
            discount_amount: reported.discount_amount + discount,
            amount_without_taxes: reported.amount_without_taxes + net - discount,
            tax_amount: reported.tax_amount + tax,
            amount_with_taxes_and_discount: reported.amount_with_taxes_and_discount + net
                - discount
                + tax,
        };
    }

    /// Replaces the reported amounts with the stored source invoice's ones,
    /// keeping the corrections.
    ///
    /// The lines must match the source one-for-one (same item and quantity in
    /// source order); a draft built from another invoice is refused.
    pub fn rebase_on(&mut self, source: &InvoiceAmountsDetails) -> Result<(), WorkflowError> {
        let matches = self.items.len() == source.items.len()
            && self
                .items
                .iter()
                .zip(&source.items)
                .all(|(line, src)| line.item == src.item_code && line.qty == src.qty);
        if !matches {
            return Err(WorkflowError::PrerequisiteMissing(format!(
                "The lines of this fix do not match invoice {}, select the invoice again",
                self.invoice.as_deref().unwrap_or_default()
            )));
        }

        self.totals = source.totals;
        for (line, src) in self.items.iter_mut().zip(&source.items) {
            line.amount_without_taxes = src.amount_without_taxes;
            line.tax_amount = src.tax_amount;
            line.discount_amount = src.discount_amount;
        }
        self.recompute_fixed_totals();
        Ok(())
    }

    /// Precondition of the confirmation step
    pub fn check_ready(&self) -> Result<&str, WorkflowError> {
        let invoice = self.invoice.as_deref().ok_or_else(|| {
            WorkflowError::PrerequisiteMissing("Select a rejected invoice first".into())
        })?;
        if self.items.is_empty() {
            return Err(WorkflowError::PrerequisiteMissing(format!(
                "Amounts of invoice {} are not loaded yet",
                invoice
            )));
        }
        if self.fix_reason.trim().is_empty() {
            return Err(ValidationError::Required("Fix reason".into()).into());
        }
        Ok(invoice)
    }

    /// Lines whose corrected amounts differ from the reported ones
    pub fn changed_lines(&self) -> usize {
        self.items
            .iter()
            .filter(|l| {
                l.fixed_amount_without_taxes != l.amount_without_taxes
                    || l.fixed_tax_amount != l.tax_amount
                    || l.fixed_discount_amount != l.discount_amount
            })
            .count()
    }
}

/// Stored rejection fix
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceFixRejection {
    #[serde(flatten)]
    pub base: BaseAggregate<InvoiceFixRejectionId>,

    pub draft: RejectionFixDraft,
    /// Additional-fields record created by the resubmission
    pub successor_id: Option<String>,
}

impl InvoiceFixRejection {
    pub fn new_for_insert(code: String, draft: RejectionFixDraft) -> Self {
        let description = draft.invoice.clone().unwrap_or_default();
        Self {
            base: BaseAggregate::new(InvoiceFixRejectionId::new_v4(), code, description),
            draft,
            successor_id: None,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.0.to_string()
    }

    pub fn is_resubmitted(&self) -> bool {
        self.successor_id.is_some()
    }

    pub fn already_resubmitted() -> WorkflowError {
        WorkflowError::PrerequisiteMissing("This rejection fix was already resubmitted".into())
    }

    /// Precondition of `fixRejection`
    pub fn ensure_resubmittable(&self) -> Result<&str, WorkflowError> {
        if self.is_resubmitted() {
            return Err(Self::already_resubmitted());
        }
        self.draft.check_ready()
    }
}

impl AggregateRoot for InvoiceFixRejection {
    type Id = InvoiceFixRejectionId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a005"
    }

    fn collection_name() -> &'static str {
        "invoice_fix_rejection"
    }

    fn element_name() -> &'static str {
        "ZATCA Invoice Fix Rejection"
    }
}

/// Answer of saving a draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedFixRejection {
    pub id: String,
    pub code: String,
}

/// Arguments of `fixRejection`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixRejectionRequest {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixRejectionResponse {
    pub successor_id: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a005_invoice_fix_rejection::InvoiceLineAmounts;

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    fn inv_0007() -> InvoiceAmountsDetails {
        InvoiceAmountsDetails {
            totals: InvoiceTotals {
                tax_amount: dec(15),
                amount_without_taxes_and_discount: dec(100),
                amount_without_taxes: dec(100),
                amount_with_taxes_and_discount: dec(115),
                discount_amount: dec(0),
            },
            items: vec![
                InvoiceLineAmounts {
                    item_code: "Widget".into(),
                    qty: dec(2),
                    amount_without_taxes: dec(60),
                    tax_amount: dec(9),
                    discount_amount: dec(0),
                },
                InvoiceLineAmounts {
                    item_code: "Gadget".into(),
                    qty: dec(1),
                    amount_without_taxes: dec(40),
                    tax_amount: dec(6),
                    discount_amount: dec(0),
                },
            ],
        }
    }

    #[test]
    fn test_apply_amounts_mirrors_source_invoice() {
        let mut draft = RejectionFixDraft::new(InvoiceType::SalesInvoice);
        draft.select_invoice(Some("INV-0007".into()));
        let source = inv_0007();
        draft.apply_amounts(&source);

        assert_eq!(draft.totals.tax_amount, dec(15));
        assert_eq!(draft.totals.amount_without_taxes_and_discount, dec(100));
        assert_eq!(draft.totals, source.totals);
        assert_eq!(draft.items.len(), source.items.len());
        for (line, src) in draft.items.iter().zip(&source.items) {
            assert_eq!(line.item, src.item_code);
            assert_eq!(line.qty, src.qty);
            assert_eq!(line.amount_without_taxes, src.amount_without_taxes);
            assert_eq!(line.tax_amount, src.tax_amount);
            assert_eq!(line.discount_amount, src.discount_amount);
        }
        assert_eq!(draft.changed_lines(), 0);
    }

    #[test]
    fn test_reselect_overwrites_lines() {
        let mut draft = RejectionFixDraft::new(InvoiceType::SalesInvoice);
        draft.apply_amounts(&inv_0007());
        let single = InvoiceAmountsDetails {
            totals: InvoiceTotals::default(),
            items: vec![InvoiceLineAmounts {
                item_code: "Other".into(),
                ..Default::default()
            }],
        };
        draft.apply_amounts(&single);
        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.items[0].item, "Other");
    }

    #[test]
    fn test_clearing_invoice_clears_amounts() {
        let mut draft = RejectionFixDraft::new(InvoiceType::SalesInvoice);
        draft.select_invoice(Some("INV-0007".into()));
        draft.apply_amounts(&inv_0007());
        draft.select_invoice(Some("  ".into()));
        assert!(draft.invoice.is_none());
        assert!(draft.items.is_empty());
        assert_eq!(draft.totals, InvoiceTotals::default());
    }

    #[test]
    fn test_check_ready() {
        let mut draft = RejectionFixDraft::new(InvoiceType::PosInvoice);
        assert!(matches!(
            draft.check_ready(),
            Err(WorkflowError::PrerequisiteMissing(_))
        ));
        draft.select_invoice(Some("POS-0001".into()));
        assert_eq!(
            draft.check_ready().unwrap_err().to_string(),
            "Amounts of invoice POS-0001 are not loaded yet"
        );
        draft.apply_amounts(&inv_0007());
        assert_eq!(
            draft.check_ready(),
            Err(WorkflowError::Validation(ValidationError::Required(
                "Fix reason".into()
            )))
        );
        draft.fix_reason = "Wrong VAT rate on line 2".into();
        assert_eq!(draft.check_ready(), Ok("POS-0001"));
    }

    #[test]
    fn test_switching_invoice_drops_previous_amounts() {
        let mut draft = RejectionFixDraft::new(InvoiceType::SalesInvoice);
        draft.select_invoice(Some("INV-0007".into()));
        draft.apply_amounts(&inv_0007());
        draft.fix_reason = "Tax corrected".into();

        draft.select_invoice(Some("INV-0009".into()));
        assert_eq!(draft.invoice.as_deref(), Some("INV-0009"));
        assert!(draft.items.is_empty());
        assert_eq!(draft.totals, InvoiceTotals::default());
        assert_eq!(draft.fixed_totals, InvoiceTotals::default());
        assert!(draft.check_ready().is_err());
    }

    #[test]
    fn test_reselecting_same_invoice_keeps_corrections() {
        let mut draft = RejectionFixDraft::new(InvoiceType::SalesInvoice);
        draft.select_invoice(Some("INV-0007".into()));
        draft.apply_amounts(&inv_0007());
        draft.set_fixed_amount(0, FixedAmount::Tax, dec(5));
        draft.select_invoice(Some("INV-0007".into()));
        assert_eq!(draft.items[0].fixed_tax_amount, dec(5));
    }

    #[test]
    fn test_invoice_type_change_recomputes_query() {
        let mut draft = RejectionFixDraft::new(InvoiceType::SalesInvoice);
        let query = draft.change_invoice_type(InvoiceType::PosInvoice);
        assert_eq!(query.invoice_type, InvoiceType::PosInvoice);
    }

    #[test]
    fn test_resubmission_happens_once() {
        let mut draft = RejectionFixDraft::new(InvoiceType::SalesInvoice);
        draft.select_invoice(Some("INV-0007".into()));
        draft.apply_amounts(&inv_0007());
        draft.fix_reason = "Buyer VAT number corrected".into();
        let mut record = InvoiceFixRejection::new_for_insert("FIX-0001".into(), draft);
        assert_eq!(record.ensure_resubmittable(), Ok("INV-0007"));
        record.successor_id = Some("SIAF-0002".into());
        assert!(record.ensure_resubmittable().is_err());
    }

    #[test]
    fn test_changed_lines() {
        let mut draft = RejectionFixDraft::new(InvoiceType::SalesInvoice);
        draft.apply_amounts(&inv_0007());
        draft.items[1].fixed_tax_amount = dec(8);
        assert_eq!(draft.changed_lines(), 1);
    }

    #[test]
    fn test_fixed_totals_follow_line_corrections() {
        let mut draft = RejectionFixDraft::new(InvoiceType::SalesInvoice);
        draft.apply_amounts(&inv_0007());
        assert_eq!(draft.fixed_totals, draft.totals);

        assert!(draft.set_fixed_amount(0, FixedAmount::Tax, dec(4)));
        assert!(draft.set_fixed_amount(1, FixedAmount::Discount, dec(10)));
        assert!(!draft.set_fixed_amount(7, FixedAmount::Tax, dec(1)));

        let line_tax: Decimal = draft.items.iter().map(|l| l.fixed_tax_amount).sum();
        assert_eq!(draft.fixed_totals.tax_amount, line_tax);
        assert_eq!(draft.fixed_totals.tax_amount, dec(10));
        assert_eq!(draft.fixed_totals.discount_amount, dec(10));
        assert_eq!(draft.fixed_totals.amount_without_taxes_and_discount, dec(100));
        assert_eq!(draft.fixed_totals.amount_without_taxes, dec(90));
        assert_eq!(draft.fixed_totals.amount_with_taxes_and_discount, dec(100));
        assert_eq!(draft.totals.tax_amount, dec(15));
    }

    #[test]
    fn test_rebase_restores_reported_amounts() {
        let mut draft = RejectionFixDraft::new(InvoiceType::SalesInvoice);
        draft.select_invoice(Some("INV-0007".into()));
        draft.apply_amounts(&inv_0007());
        draft.set_fixed_amount(0, FixedAmount::Tax, dec(7));
        // tampered copy of the reported amounts
        draft.totals.tax_amount = dec(99);
        draft.items[1].tax_amount = dec(50);

        draft.rebase_on(&inv_0007()).unwrap();
        assert_eq!(draft.totals, inv_0007().totals);
        assert_eq!(draft.items[1].tax_amount, dec(6));
        assert_eq!(draft.items[0].fixed_tax_amount, dec(7));
        assert_eq!(draft.fixed_totals.tax_amount, dec(13));
    }

    #[test]
    fn test_rebase_refuses_lines_of_another_invoice() {
        let mut draft = RejectionFixDraft::new(InvoiceType::SalesInvoice);
        draft.select_invoice(Some("INV-0009".into()));
        draft.apply_amounts(&inv_0007());

        let inv_0009 = InvoiceAmountsDetails {
            totals: InvoiceTotals {
                tax_amount: dec(99),
                ..Default::default()
            },
            items: vec![InvoiceLineAmounts {
                item_code: "INV-0009-item".into(),
                qty: dec(1),
                tax_amount: dec(99),
                ..Default::default()
            }],
        };
        let err = draft.rebase_on(&inv_0009).unwrap_err();
        assert!(err.to_string().contains("INV-0009"));

        // same count, different item
        let mut renamed = inv_0007();
        renamed.items[1].item_code = "Other".into();
        assert!(draft.rebase_on(&renamed).is_err());
    }
}
