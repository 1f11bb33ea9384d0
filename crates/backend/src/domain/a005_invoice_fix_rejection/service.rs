use super::repository;
use crate::domain::a004_invoice_additional_fields::repository as additional_fields;
use contracts::domain::a005_invoice_fix_rejection::{
    FixRejectionRequest, FixRejectionResponse, InvoiceFixRejection, RejectionFixDraft,
    SavedFixRejection,
};
use contracts::shared::errors::WorkflowError;
use sea_orm::TransactionTrait;
use uuid::Uuid;

use crate::shared::data::db::get_connection;

/// Stores a draft; the invoice must still be rejected and latest.
///
/// The reported amounts are taken from the stored invoice, not from the
/// client; only the corrections and the reason come from the draft.
pub async fn save_draft(mut draft: RejectionFixDraft) -> anyhow::Result<SavedFixRejection> {
    let invoice = draft.check_ready()?.to_string();
    let source = additional_fields::get_latest(draft.invoice_type, &invoice)
        .await?
        .ok_or_else(|| {
            WorkflowError::PrerequisiteMissing("Sales invoice doesn't have additional fields".into())
        })?;
    if !source.is_fixable() {
        return Err(WorkflowError::PrerequisiteMissing(format!(
            "Invoice {} is not rejected (status: {})",
            invoice,
            source.integration_status.as_str()
        ))
        .into());
    }
    draft.rebase_on(&source.amounts_details())?;

    let code = format!("FIX-{:04}", repository::count().await? + 1);
    let mut aggregate = InvoiceFixRejection::new_for_insert(code, draft);
    aggregate.base.touch();
    repository::insert(&aggregate).await?;

    Ok(SavedFixRejection {
        id: aggregate.to_string_id(),
        code: aggregate.base.code,
    })
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<InvoiceFixRejection>> {
    repository::get_by_id(id).await
}

/// Resubmits a saved fix: a new additional-fields record with the fixed
/// amounts replaces the rejected one as the latest
pub async fn fix_rejection(request: FixRejectionRequest) -> anyhow::Result<FixRejectionResponse> {
    let id = Uuid::parse_str(&request.id).map_err(|_| anyhow::anyhow!("Invalid ID"))?;
    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Rejection fix {} not found", request.id))?;
    let invoice = aggregate.ensure_resubmittable()?.to_string();
    let invoice_type = aggregate.draft.invoice_type;

    let source = additional_fields::get_latest(invoice_type, &invoice)
        .await?
        .ok_or_else(|| {
            WorkflowError::PrerequisiteMissing("Sales invoice doesn't have additional fields".into())
        })?;
    if !source.is_fixable() {
        return Err(
            WorkflowError::PrerequisiteMissing(format!("Invoice {} is no longer rejected", invoice))
                .into(),
        );
    }
    aggregate.draft.rebase_on(&source.amounts_details())?;

    let successor_code = format!("SIAF-{:04}", additional_fields::count().await? + 1);
    let successor = source.resubmission(
        Uuid::new_v4().to_string(),
        successor_code,
        &aggregate.draft,
    );

    let txn = get_connection().begin().await?;
    if !repository::mark_resubmitted(&txn, id, &successor.id).await? {
        return Err(InvoiceFixRejection::already_resubmitted().into());
    }
    additional_fields::clear_latest(&txn, invoice_type, &invoice).await?;
    additional_fields::insert(&txn, &successor).await?;
    aggregate.successor_id = Some(successor.id.clone());
    aggregate.base.touch();
    repository::update(&txn, &aggregate).await?;
    txn.commit().await?;

    tracing::info!(
        "Rejection fix {} resubmitted invoice {} as {} ({} changed lines)",
        aggregate.base.code,
        invoice,
        successor.code,
        aggregate.draft.changed_lines()
    );
    Ok(FixRejectionResponse {
        successor_id: successor.id,
        message: format!("Invoice {} queued for resubmission", invoice),
    })
}
