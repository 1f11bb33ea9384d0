use serde::{Deserialize, Serialize};

use crate::domain::a005_invoice_fix_rejection::{
    InvoiceAmountsDetails, InvoiceLineAmounts, InvoiceTotals, RejectionFixDraft,
};
use crate::enums::{IntegrationStatus, InvoiceType};

/// ZATCA-side record of one reported invoice.
///
/// An invoice may have several records over time; exactly one of them is
/// flagged `is_latest`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceAdditionalFields {
    pub id: String,
    pub code: String,
    pub sales_invoice: String,
    pub invoice_doctype: InvoiceType,
    pub integration_status: IntegrationStatus,
    pub is_latest: bool,
    pub totals: InvoiceTotals,
    pub items: Vec<InvoiceLineAmounts>,
}

impl InvoiceAdditionalFields {
    pub fn amounts_details(&self) -> InvoiceAmountsDetails {
        InvoiceAmountsDetails {
            totals: self.totals,
            items: self.items.clone(),
        }
    }

    /// Can be picked in a rejection fix
    pub fn is_fixable(&self) -> bool {
        self.is_latest && self.integration_status == IntegrationStatus::Rejected
    }

    /// Record that replaces this one after a rejection fix: corrected
    /// amounts, queued for the next batch, flagged latest
    pub fn resubmission(&self, id: String, code: String, draft: &RejectionFixDraft) -> Self {
        Self {
            id,
            code,
            sales_invoice: self.sales_invoice.clone(),
            invoice_doctype: self.invoice_doctype,
            integration_status: IntegrationStatus::ReadyForBatch,
            is_latest: true,
            totals: draft.fixed_totals,
            items: draft
                .items
                .iter()
                .map(|line| InvoiceLineAmounts {
                    item_code: line.item.clone(),
                    qty: line.qty,
                    amount_without_taxes: line.fixed_amount_without_taxes,
                    tax_amount: line.fixed_tax_amount,
                    discount_amount: line.fixed_discount_amount,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a005_invoice_fix_rejection::FixedAmount;
    use rust_decimal::Decimal;

    fn rejected() -> InvoiceAdditionalFields {
        InvoiceAdditionalFields {
            id: "f1".into(),
            code: "SIAF-0001".into(),
            sales_invoice: "INV-0007".into(),
            invoice_doctype: InvoiceType::SalesInvoice,
            integration_status: IntegrationStatus::Rejected,
            is_latest: true,
            totals: InvoiceTotals {
                tax_amount: Decimal::from(15),
                amount_without_taxes_and_discount: Decimal::from(100),
                amount_without_taxes: Decimal::from(100),
                amount_with_taxes_and_discount: Decimal::from(115),
                discount_amount: Decimal::ZERO,
            },
            items: vec![InvoiceLineAmounts {
                item_code: "Widget".into(),
                qty: Decimal::from(1),
                amount_without_taxes: Decimal::from(100),
                tax_amount: Decimal::from(15),
                discount_amount: Decimal::ZERO,
            }],
        }
    }

    #[test]
    fn test_resubmission_uses_fixed_amounts() {
        let source = rejected();
        let mut draft = RejectionFixDraft::new(InvoiceType::SalesInvoice);
        draft.select_invoice(Some(source.sales_invoice.clone()));
        draft.apply_amounts(&source.amounts_details());
        draft.set_fixed_amount(0, FixedAmount::Tax, Decimal::from(14));

        let next = source.resubmission("f2".into(), "SIAF-0002".into(), &draft);
        assert_eq!(next.integration_status, IntegrationStatus::ReadyForBatch);
        assert!(next.is_latest);
        assert!(!next.is_fixable());
        assert_eq!(next.sales_invoice, "INV-0007");
        assert_eq!(next.totals.tax_amount, Decimal::from(14));
        assert_eq!(next.items[0].tax_amount, Decimal::from(14));
        assert_eq!(source.totals.tax_amount, Decimal::from(15));
    }

    #[test]
    fn test_successor_totals_agree_with_its_lines() {
        let source = rejected();
        let mut draft = RejectionFixDraft::new(InvoiceType::SalesInvoice);
        draft.select_invoice(Some(source.sales_invoice.clone()));
        draft.apply_amounts(&source.amounts_details());
        draft.set_fixed_amount(0, FixedAmount::Tax, Decimal::from(10));
        draft.rebase_on(&source.amounts_details()).unwrap();

        let next = source.resubmission("f2".into(), "SIAF-0002".into(), &draft);
        let line_tax: Decimal = next.items.iter().map(|l| l.tax_amount).sum();
        assert_eq!(next.totals.tax_amount, line_tax);
        assert_eq!(next.totals.tax_amount, Decimal::from(10));
        assert_eq!(next.totals.amount_with_taxes_and_discount, Decimal::from(110));
    }

    #[test]
    fn test_only_latest_rejected_is_fixable() {
        let mut record = rejected();
        assert!(record.is_fixable());
        record.is_latest = false;
        assert!(!record.is_fixable());
        record.is_latest = true;
        record.integration_status = IntegrationStatus::Accepted;
        assert!(!record.is_fixable());
    }
}
