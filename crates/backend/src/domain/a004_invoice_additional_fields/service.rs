use super::repository;
use contracts::domain::a004_invoice_additional_fields::InvoiceAdditionalFields;
use contracts::domain::a005_invoice_fix_rejection::{
    IntegrationStatusResponse, InvoiceAmountsDetails, InvoiceAmountsRequest, InvoiceLineAmounts,
    InvoiceTotals, RejectedInvoiceQuery,
};
use contracts::enums::{IntegrationStatus, InvoiceType};
use rust_decimal::Decimal;

use crate::shared::data::db::get_connection;

/// Invoice names offered by the invoice field of a rejection fix
pub async fn list_rejected(query: RejectedInvoiceQuery) -> anyhow::Result<Vec<String>> {
    Ok(
        repository::list_latest_by_status(query.invoice_type, query.status())
            .await?
            .into_iter()
            .map(|r| r.sales_invoice)
            .collect(),
    )
}

/// Totals and lines of the latest record of an invoice
pub async fn fetch_invoice_amounts_details(
    request: &InvoiceAmountsRequest,
) -> anyhow::Result<InvoiceAmountsDetails> {
    let record = repository::get_latest(request.invoice_type, &request.invoice)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Sales invoice doesn't have additional fields"))?;
    Ok(record.amounts_details())
}

/// Status of the latest record of an invoice; `doctype` narrows the lookup
pub async fn integration_status(
    invoice: &str,
    doctype: Option<InvoiceType>,
) -> anyhow::Result<IntegrationStatusResponse> {
    let latest = match doctype {
        Some(doctype) => repository::get_latest(doctype, invoice).await?,
        None => repository::get_latest_for_invoice(invoice).await?,
    };
    let status = latest.map(|r| r.integration_status);
    Ok(IntegrationStatusResponse {
        invoice: invoice.to_string(),
        status,
    })
}

fn sample(
    n: u64,
    invoice: &str,
    doctype: InvoiceType,
    status: IntegrationStatus,
    lines: &[(&str, i64, i64)],
) -> InvoiceAdditionalFields {
    let items: Vec<InvoiceLineAmounts> = lines
        .iter()
        .map(|(item, qty, amount)| {
            let amount = Decimal::from(*amount);
            InvoiceLineAmounts {
                item_code: item.to_string(),
                qty: Decimal::from(*qty),
                amount_without_taxes: amount,
                tax_amount: amount * Decimal::new(15, 2),
                discount_amount: Decimal::ZERO,
            }
        })
        .collect();
    let net: Decimal = items.iter().map(|l| l.amount_without_taxes).sum();
    let tax: Decimal = items.iter().map(|l| l.tax_amount).sum();

    InvoiceAdditionalFields {
        id: uuid::Uuid::new_v4().to_string(),
        code: format!("SIAF-{:04}", n),
        sales_invoice: invoice.to_string(),
        invoice_doctype: doctype,
        integration_status: status,
        is_latest: true,
        totals: InvoiceTotals {
            tax_amount: tax,
            amount_without_taxes_and_discount: net,
            amount_without_taxes: net,
            amount_with_taxes_and_discount: net + tax,
            discount_amount: Decimal::ZERO,
        },
        items,
    }
}

/// Inserts reported invoices in various states when the table is empty
pub async fn insert_test_data() -> anyhow::Result<()> {
    if repository::count().await? > 0 {
        tracing::info!("Additional fields already present, skipping test data");
        return Ok(());
    }

    let records = [
        sample(
            1,
            "INV-0007",
            InvoiceType::SalesInvoice,
            IntegrationStatus::Rejected,
            &[("Widget", 1, 100), ("Gadget", 2, 50)],
        ),
        sample(
            2,
            "INV-0008",
            InvoiceType::SalesInvoice,
            IntegrationStatus::Accepted,
            &[("Widget", 3, 300)],
        ),
        sample(
            3,
            "POS-0003",
            InvoiceType::PosInvoice,
            IntegrationStatus::Rejected,
            &[("Coffee", 4, 40)],
        ),
    ];
    for record in &records {
        repository::insert(get_connection(), record).await?;
    }
    tracing::info!("Inserted {} additional fields records", records.len());
    Ok(())
}
