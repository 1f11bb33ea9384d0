use contracts::domain::a005_invoice_fix_rejection::{
    FixRejectionRequest, FixRejectionResponse, IntegrationStatusResponse, InvoiceAmountsDetails,
    InvoiceAmountsRequest, InvoiceFixRejection, RejectedInvoiceQuery, RejectionFixDraft,
    SavedFixRejection,
};
use contracts::enums::InvoiceType;
use contracts::shared::api;

use crate::shared::api_utils::{get_json, post_json};

/// Route of the rejected-invoices lookup for a query
fn rejected_url(query: &RejectedInvoiceQuery) -> String {
    format!(
        "{}?invoice_type={}",
        api::FIX_REJECTION_REJECTED,
        urlencoding::encode(query.invoice_type.label())
    )
}

/// Names of the rejected invoices selectable for the query
pub async fn fetch_rejected(query: RejectedInvoiceQuery) -> Result<Vec<String>, String> {
    get_json(&rejected_url(&query)).await
}

pub async fn fetch_amounts(
    invoice_type: InvoiceType,
    invoice: String,
) -> Result<InvoiceAmountsDetails, String> {
    let request = InvoiceAmountsRequest {
        invoice_type,
        invoice,
    };
    post_json(api::FIX_REJECTION_AMOUNTS, &request).await
}

pub async fn fetch_integration_status(
    invoice: &str,
    doctype: InvoiceType,
) -> Result<IntegrationStatusResponse, String> {
    get_json(&format!(
        "{}?invoice={}&doctype={}",
        api::INTEGRATION_STATUS,
        urlencoding::encode(invoice),
        urlencoding::encode(doctype.label())
    ))
    .await
}

pub async fn fetch_by_id(id: &str) -> Result<InvoiceFixRejection, String> {
    get_json(&api::invoice_fix_rejection_path(id)).await
}

pub async fn save_draft(draft: &RejectionFixDraft) -> Result<SavedFixRejection, String> {
    post_json(api::INVOICE_FIX_REJECTION, draft).await
}

pub async fn fix_rejection(id: String) -> Result<FixRejectionResponse, String> {
    post_json(api::FIX_REJECTION, &FixRejectionRequest { id }).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_url_encodes_label() {
        assert_eq!(
            rejected_url(&RejectedInvoiceQuery::new(InvoiceType::PosInvoice)),
            "/api/method/fix_rejection/rejected?invoice_type=POS%20Invoice"
        );
    }
}
