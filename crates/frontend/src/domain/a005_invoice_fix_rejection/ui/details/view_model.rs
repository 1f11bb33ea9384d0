use super::model;
use crate::shared::notices::NoticeStack;
use contracts::domain::a005_invoice_fix_rejection::{
    FixRejectionResponse, FixedAmount, RejectionFixDraft, SavedFixRejection,
};
use contracts::enums::{IntegrationStatus, InvoiceType};
use contracts::shared::notice::Notice;
use leptos::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses a user-typed amount; an empty field means zero
pub fn parse_amount(raw: &str) -> Result<Decimal, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let value = Decimal::from_str(trimmed).map_err(|_| format!("'{}' is not a number", trimmed))?;
    if value.is_sign_negative() {
        return Err(format!("Amount cannot be negative: {}", trimmed));
    }
    Ok(value)
}

/// ViewModel for the Invoice Fix Rejection form
#[derive(Clone, Copy)]
pub struct FixRejectionViewModel {
    pub draft: RwSignal<RejectionFixDraft>,
    pub rejected: RwSignal<Vec<String>>,
    pub status: RwSignal<Option<IntegrationStatus>>,
    /// Record holding the draft on the server, once saved
    pub saved: RwSignal<Option<SavedFixRejection>>,
    pub successor: RwSignal<Option<String>>,
    pub dirty: RwSignal<bool>,
    pub confirming: RwSignal<bool>,
    pub busy: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    notices: NoticeStack,
}

impl FixRejectionViewModel {
    pub fn new(notices: NoticeStack) -> Self {
        Self {
            draft: RwSignal::new(RejectionFixDraft::new(InvoiceType::default())),
            rejected: RwSignal::new(Vec::new()),
            status: RwSignal::new(None),
            saved: RwSignal::new(None),
            successor: RwSignal::new(None),
            dirty: RwSignal::new(false),
            confirming: RwSignal::new(false),
            busy: RwSignal::new(false),
            error: RwSignal::new(None),
            notices,
        }
    }

    pub fn is_resubmitted(&self) -> bool {
        self.successor.with(Option::is_some)
    }

    pub fn can_fix(&self) -> bool {
        !self.is_resubmitted()
            && !self.busy.get()
            && self.draft.with(|d| d.check_ready().is_ok())
    }

    /// Opens an existing record, or starts a new draft with the rejected
    /// invoices of the default type
    pub fn load(&self, id: Option<String>) {
        let Some(existing_id) = id else {
            let query = self.draft.with_untracked(|d| d.invoice_query());
            self.refresh_rejected(query.invoice_type);
            return;
        };
        let this = *self;
        wasm_bindgen_futures::spawn_local(async move {
            match model::fetch_by_id(&existing_id).await {
                Ok(record) => {
                    let invoice_type = record.draft.invoice_type;
                    let invoice = record.draft.invoice.clone();
                    this.saved.set(Some(SavedFixRejection {
                        id: record.to_string_id(),
                        code: record.base.code.clone(),
                    }));
                    this.successor.set(record.successor_id.clone());
                    this.draft.set(record.draft);
                    this.dirty.set(false);
                    this.refresh_rejected(invoice_type);
                    if let Some(invoice) = invoice {
                        this.refresh_status(invoice, invoice_type);
                    }
                }
                Err(e) => this.error.set(Some(format!("Failed to load: {}", e))),
            }
        });
    }

    fn refresh_rejected(&self, invoice_type: InvoiceType) {
        let this = *self;
        let query = self.draft.with_untracked(|d| d.invoice_query());
        wasm_bindgen_futures::spawn_local(async move {
            match model::fetch_rejected(query).await {
                Ok(list) => {
                    if this.draft.with_untracked(|d| d.invoice_type == invoice_type) {
                        this.rejected.set(list);
                    }
                }
                Err(e) => this.error.set(Some(format!("Failed to load rejected invoices: {}", e))),
            }
        });
    }

    fn refresh_status(&self, invoice: String, invoice_type: InvoiceType) {
        let status = self.status;
        wasm_bindgen_futures::spawn_local(async move {
            match model::fetch_integration_status(&invoice, invoice_type).await {
                Ok(response) => status.set(response.status),
                Err(e) => log::warn!("integration status of {} unavailable: {}", invoice, e),
            }
        });
    }

    /// Invoice type changed: the invoice choice starts over
    pub fn change_invoice_type(&self, label: &str) {
        let Some(invoice_type) = InvoiceType::from_label(label) else {
            return;
        };
        self.draft.update(|d| {
            d.change_invoice_type(invoice_type);
            d.select_invoice(None);
        });
        self.rejected.set(Vec::new());
        self.status.set(None);
        self.dirty.set(true);
        self.refresh_rejected(invoice_type);
    }

    /// Invoice changed: its amounts are copied into the draft
    pub fn select_invoice(&self, invoice: String) {
        self.draft.update(|d| d.select_invoice(Some(invoice.clone())));
        self.status.set(None);
        self.dirty.set(true);
        let Some(invoice) = self.draft.with_untracked(|d| d.invoice.clone()) else {
            return;
        };
        let invoice_type = self.draft.with_untracked(|d| d.invoice_type);
        self.refresh_status(invoice.clone(), invoice_type);

        let this = *self;
        wasm_bindgen_futures::spawn_local(async move {
            match model::fetch_amounts(invoice_type, invoice.clone()).await {
                Ok(details) => {
                    let current = this
                        .draft
                        .with_untracked(|d| d.invoice.as_deref() == Some(invoice.as_str()));
                    if current {
                        this.draft.update(|d| d.apply_amounts(&details));
                        this.error.set(None);
                    }
                }
                Err(e) => {
                    this.notices.push(Notice::failure(e.clone()));
                    this.error.set(Some(e));
                }
            }
        });
    }

    pub fn set_fixed_amount(&self, index: usize, column: FixedAmount, raw: &str) {
        match parse_amount(raw) {
            Ok(value) => {
                self.draft.update(|d| {
                    d.set_fixed_amount(index, column, value);
                });
                self.dirty.set(true);
                self.error.set(None);
            }
            Err(e) => self.error.set(Some(e)),
        }
    }

    pub fn set_fix_reason(&self, value: String) {
        self.draft.update(|d| d.fix_reason = value);
        self.dirty.set(true);
    }

    pub fn save_command(&self) {
        let draft = self.draft.get_untracked();
        if let Err(e) = draft.check_ready() {
            self.notices.push(Notice::warning(e.to_string()));
            return;
        }
        let this = *self;
        this.busy.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let result = model::save_draft(&draft).await;
            this.busy.set(false);
            match result {
                Ok(saved) => {
                    this.notices
                        .push(Notice::success(format!("Saved as {}", saved.code)));
                    this.saved.set(Some(saved));
                    this.dirty.set(false);
                }
                Err(e) => this.error.set(Some(e)),
            }
        });
    }

    /// First step of "Fix Rejection": checks the draft and asks to confirm
    pub fn request_fix(&self) {
        if self.is_resubmitted() {
            return;
        }
        let ready = self.draft.with_untracked(|d| d.check_ready().map(str::to_string));
        match ready {
            Ok(_) => self.confirming.set(true),
            Err(e) => self.notices.push(Notice::warning(e.to_string())),
        }
    }

    pub fn cancel_fix(&self) {
        self.confirming.set(false);
    }

    /// Saves unsaved edits, then resubmits the saved record
    pub fn confirm_fix(&self) {
        self.confirming.set(false);
        let this = *self;
        let draft = self.draft.get_untracked();
        let saved = self.saved.get_untracked().filter(|_| !self.dirty.get_untracked());
        this.busy.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let saved = match saved {
                Some(saved) => saved,
                None => match model::save_draft(&draft).await {
                    Ok(saved) => {
                        this.saved.set(Some(saved.clone()));
                        this.dirty.set(false);
                        saved
                    }
                    Err(e) => {
                        this.busy.set(false);
                        this.notices.push(Notice::failure(e));
                        return;
                    }
                },
            };

            let result = model::fix_rejection(saved.id).await;
            this.busy.set(false);
            match result {
                Ok(FixRejectionResponse {
                    successor_id,
                    message,
                }) => {
                    log::info!("{} resubmitted as {}", saved.code, successor_id);
                    this.successor.set(Some(successor_id));
                    this.notices.push(Notice::success(message));
                    if let Some(invoice) = draft.invoice {
                        this.refresh_status(invoice, draft.invoice_type);
                    }
                }
                Err(e) => this.notices.push(Notice::failure(e)),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(" 12.50 "), Ok(Decimal::new(1250, 2)));
        assert_eq!(parse_amount(""), Ok(Decimal::ZERO));
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("-1").is_err());
    }
}
