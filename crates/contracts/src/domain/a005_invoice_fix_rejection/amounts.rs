use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::enums::{IntegrationStatus, InvoiceType};

/// Document-level amounts of an invoice as reported to ZATCA
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub tax_amount: Decimal,
    pub amount_without_taxes_and_discount: Decimal,
    pub amount_without_taxes: Decimal,
    pub amount_with_taxes_and_discount: Decimal,
    pub discount_amount: Decimal,
}

/// Amounts of one invoice line
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InvoiceLineAmounts {
    pub item_code: String,
    pub qty: Decimal,
    pub amount_without_taxes: Decimal,
    pub tax_amount: Decimal,
    pub discount_amount: Decimal,
}

/// Arguments of `fetchInvoiceAmountsDetails`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceAmountsRequest {
    pub invoice_type: InvoiceType,
    pub invoice: String,
}

/// Computed totals and lines of a previously reported invoice
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InvoiceAmountsDetails {
    pub totals: InvoiceTotals,
    pub items: Vec<InvoiceLineAmounts>,
}

/// Options of the invoice field: rejected, latest-only, of one doctype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedInvoiceQuery {
    pub invoice_type: InvoiceType,
}

impl RejectedInvoiceQuery {
    pub fn new(invoice_type: InvoiceType) -> Self {
        Self { invoice_type }
    }

    pub fn status(&self) -> IntegrationStatus {
        IntegrationStatus::Rejected
    }
}

/// Latest integration status of one invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationStatusResponse {
    pub invoice: String,
    pub status: Option<IntegrationStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    #[test]
    fn test_amounts_json_uses_numbers() {
        let details = InvoiceAmountsDetails {
            totals: InvoiceTotals {
                tax_amount: dec(15),
                amount_without_taxes_and_discount: dec(100),
                ..Default::default()
            },
            items: vec![],
        };
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["totals"]["tax_amount"], serde_json::json!(15.0));
        let back: InvoiceAmountsDetails = serde_json::from_value(json).unwrap();
        assert_eq!(back, details);
    }
}
