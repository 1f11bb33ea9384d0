use super::model;
use crate::domain::a003_company;
use crate::shared::notices::NoticeStack;
use crate::usecases::u501_feedback::FeedbackLauncher;
use contracts::domain::a001_business_settings::aggregate::{
    BusinessSettings, BusinessSettingsDto, SyncMode,
};
use contracts::domain::a003_company::Company;
use contracts::domain::common::LinkFilter;
use contracts::shared::errors::WorkflowError;
use contracts::shared::notice::Notice;
use contracts::usecases::u501_feedback::DialogMode;
use leptos::prelude::*;

/// Portal call waiting for the user to type an OTP
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpAction {
    Onboard,
    ProductionCsid,
}

impl OtpAction {
    pub fn title(&self) -> &'static str {
        match self {
            OtpAction::Onboard => "Onboard to ZATCA",
            OtpAction::ProductionCsid => "Get Production CSID",
        }
    }
}

/// ViewModel for the Business Settings details form
#[derive(Clone, Copy)]
pub struct BusinessSettingsDetailsViewModel {
    pub form: RwSignal<BusinessSettingsDto>,
    /// Last saved state, carries the request ids set by the portal calls
    pub record: RwSignal<Option<BusinessSettings>>,
    pub companies: RwSignal<Vec<Company>>,
    pub address_filter: RwSignal<LinkFilter>,
    pub otp_action: RwSignal<Option<OtpAction>>,
    pub otp: RwSignal<String>,
    pub busy: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    notices: NoticeStack,
    launcher: Option<FeedbackLauncher>,
}

impl BusinessSettingsDetailsViewModel {
    pub fn new(notices: NoticeStack, launcher: Option<FeedbackLauncher>) -> Self {
        let mut dto = BusinessSettingsDto::default();
        dto.seed_other_ids();
        Self {
            form: RwSignal::new(dto),
            record: RwSignal::new(None),
            companies: RwSignal::new(Vec::new()),
            address_filter: RwSignal::new(LinkFilter::default()),
            otp_action: RwSignal::new(None),
            otp: RwSignal::new(String::new()),
            busy: RwSignal::new(false),
            error: RwSignal::new(None),
            notices,
            launcher,
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.form.with(|f| f.id.is_some())
    }

    pub fn is_form_valid(&self) -> bool {
        self.form.with(has_required_fields)
    }

    pub fn is_onboarded(&self) -> bool {
        self.record
            .with(|r| r.as_ref().map(|r| r.ensure_onboarded().is_ok()).unwrap_or(false))
    }

    pub fn load_companies(&self) {
        let companies = self.companies;
        let error = self.error;
        wasm_bindgen_futures::spawn_local(async move {
            match a003_company::fetch_companies().await {
                Ok(list) => companies.set(list),
                Err(e) => error.set(Some(format!("Failed to load companies: {}", e))),
            }
        });
    }

    /// Load form data from server if ID is provided
    pub fn load_if_needed(&self, id: Option<String>) {
        let Some(existing_id) = id else {
            return;
        };
        let this = *self;
        wasm_bindgen_futures::spawn_local(async move {
            match model::fetch_by_id(&existing_id).await {
                Ok(aggregate) => this.apply_record(aggregate),
                Err(e) => this.error.set(Some(format!("Failed to load: {}", e))),
            }
        });
    }

    fn apply_record(&self, aggregate: BusinessSettings) {
        let mut dto = BusinessSettingsDto::from(&aggregate);
        dto.seed_other_ids();
        let company = dto.company.clone();
        self.form.set(dto);
        self.record.set(Some(aggregate));
        self.refresh_address_filter(company);
    }

    /// Company changed: the address options follow the new company
    pub fn change_company(&self, company: String) {
        let unchanged = self.form.with_untracked(|f| f.company == company);
        if unchanged {
            return;
        }
        self.form.update(|f| f.company = company.clone());
        self.refresh_address_filter(company);
    }

    fn refresh_address_filter(&self, company: String) {
        let form = self.form;
        let address_filter = self.address_filter;
        let error = self.error;
        if company.trim().is_empty() {
            address_filter.set(LinkFilter::default());
            form.update(|f| f.company_address.clear());
            return;
        }
        wasm_bindgen_futures::spawn_local(async move {
            match a003_company::fetch_company_addresses(&company).await {
                Ok(addresses) => {
                    let filter = LinkFilter::new(addresses);
                    // a late answer for a company no longer selected is dropped
                    if form.with_untracked(|f| f.company == company) {
                        form.update(|f| {
                            f.company_address = filter.retain_selection(&f.company_address)
                        });
                        address_filter.set(filter);
                    }
                }
                Err(e) => error.set(Some(format!("Failed to load addresses: {}", e))),
            }
        });
    }

    pub fn set_sync_mode(&self, value: &str) {
        self.form.update(|f| f.sync_with_zatca = SyncMode::parse(value));
    }

    pub fn set_other_id_value(&self, index: usize, value: String) {
        self.form.update(|f| {
            if let Some(row) = f.other_ids.get_mut(index) {
                row.value = value;
            }
        });
    }

    pub fn remove_other_id(&self, index: usize) {
        self.form.update(|f| {
            if index < f.other_ids.len() {
                f.other_ids.remove(index);
            }
        });
    }

    /// Save form data, then reload the stored record
    pub fn save_command(&self, on_saved: Callback<()>) {
        let current = self.form.get_untracked();
        if !has_required_fields(&current) {
            self.error.set(Some(
                "Company, seller name and VAT registration number are required".to_string(),
            ));
            return;
        }

        let this = *self;
        this.busy.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let saved = model::save_form(&current).await;
            this.busy.set(false);
            match saved {
                Ok(id) => {
                    log::info!("business settings {} saved", id);
                    this.error.set(None);
                    this.notices.push(Notice::success("Business settings saved"));
                    match model::fetch_by_id(&id).await {
                        Ok(aggregate) => this.apply_record(aggregate),
                        Err(e) => log::warn!("reload after save failed: {}", e),
                    }
                    on_saved.run(());
                }
                Err(e) => this.error.set(Some(e)),
            }
        });
    }

    /// Opens the OTP prompt, unless a prerequisite of the call is missing
    pub fn request_otp(&self, action: OtpAction) {
        let record = self.record.get_untracked();
        let Some(record) = record else {
            self.notices
                .push(Notice::warning("Save the business settings first"));
            return;
        };
        if action == OtpAction::ProductionCsid {
            if let Err(e) = record.ensure_onboarded() {
                self.notices.push(Notice::failure(e.to_string()));
                return;
            }
        }
        self.otp.set(String::new());
        self.otp_action.set(Some(action));
    }

    pub fn cancel_otp(&self) {
        self.otp_action.set(None);
        self.otp.set(String::new());
    }

    /// Sends the OTP to the portal call chosen in `request_otp`
    pub fn confirm_otp(&self) {
        let Some(action) = self.otp_action.get_untracked() else {
            return;
        };
        let Some(record) = self.record.get_untracked() else {
            return;
        };
        let otp = self.otp.get_untracked();
        if otp.trim().is_empty() {
            self.error.set(Some("OTP is required".to_string()));
            return;
        }

        let this = *self;
        let id = record.to_string_id();
        this.busy.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let result = match action {
                OtpAction::Onboard => model::onboard(&id, otp).await,
                OtpAction::ProductionCsid => model::production_csid(&id, otp).await,
            };
            this.busy.set(false);
            this.otp_action.set(None);

            let envelope = match result {
                Ok(envelope) => envelope,
                Err(e) => {
                    this.notices.push(Notice::failure(e));
                    return;
                }
            };
            if !envelope.success {
                let err = WorkflowError::RemoteSubmissionFailed {
                    message: envelope.message,
                };
                this.notices.push(Notice::failure(err.to_string()));
                return;
            }

            this.notices.push(Notice::success(envelope.message));
            match model::fetch_by_id(&id).await {
                Ok(aggregate) => this.apply_record(aggregate),
                Err(e) => log::warn!("reload after {:?} failed: {}", action, e),
            }
            if action == OtpAction::Onboard {
                this.prompt_feedback(record.company, id);
            }
        });
    }

    fn prompt_feedback(&self, company: String, document_id: String) {
        if let Some(launcher) = self.launcher {
            launcher.open(
                self.notices,
                company,
                DialogMode::PostSavePrompt { document_id },
            );
        }
    }
}

fn has_required_fields(form: &BusinessSettingsDto) -> bool {
    !form.company.trim().is_empty()
        && !form.seller_name.trim().is_empty()
        && !form.vat_registration_number.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields() {
        let mut form = BusinessSettingsDto {
            company: "ACME KSA".into(),
            seller_name: "ACME Trading".into(),
            ..Default::default()
        };
        assert!(!has_required_fields(&form));
        form.vat_registration_number = "300000000000003".into();
        assert!(has_required_fields(&form));
    }
}
