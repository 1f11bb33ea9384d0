use super::model;
use crate::domain::a003_company;
use crate::shared::notices::NoticeStack;
use contracts::domain::a002_phase1_business_settings::aggregate::{
    Phase1BusinessSettingsDto, Phase1Status, TransactionType,
};
use contracts::domain::a003_company::Company;
use contracts::shared::notice::Notice;
use leptos::prelude::*;

/// ViewModel for the Phase 1 Business Settings details form
#[derive(Clone, Copy)]
pub struct Phase1DetailsViewModel {
    pub form: RwSignal<Phase1BusinessSettingsDto>,
    pub companies: RwSignal<Vec<Company>>,
    pub busy: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    notices: NoticeStack,
}

impl Phase1DetailsViewModel {
    pub fn new(notices: NoticeStack) -> Self {
        Self {
            form: RwSignal::new(Phase1BusinessSettingsDto::default()),
            companies: RwSignal::new(Vec::new()),
            busy: RwSignal::new(false),
            error: RwSignal::new(None),
            notices,
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.form.with(|f| f.id.is_some())
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

    pub fn load_if_needed(&self, id: Option<String>) {
        let Some(existing_id) = id else {
            return;
        };
        let form = self.form;
        let error = self.error;
        wasm_bindgen_futures::spawn_local(async move {
            match model::fetch_by_id(&existing_id).await {
                Ok(aggregate) => form.set(Phase1BusinessSettingsDto::from(&aggregate)),
                Err(e) => error.set(Some(format!("Failed to load: {}", e))),
            }
        });
    }

    /// Company changed: the address is replaced by the company's primary
    /// address, or cleared when it has none
    pub fn change_company(&self, company: String) {
        if company.trim().is_empty() {
            self.form.update(|f| f.change_company(company, &[]));
            return;
        }
        self.form.update(|f| f.company = company.clone());

        let form = self.form;
        let error = self.error;
        wasm_bindgen_futures::spawn_local(async move {
            match a003_company::fetch_primary_address(&company).await {
                Ok(addresses) => {
                    if form.with_untracked(|f| f.company == company) {
                        form.update(|f| f.change_company(company, &addresses));
                    }
                }
                Err(e) => error.set(Some(format!("Failed to load primary address: {}", e))),
            }
        });
    }

    pub fn set_status(&self, value: &str) {
        self.form.update(|f| f.status = Phase1Status::parse(value));
    }

    pub fn set_transaction_type(&self, value: &str) {
        self.form
            .update(|f| f.type_of_transaction = TransactionType::parse(value));
    }

    pub fn save_command(&self, on_saved: Callback<()>) {
        let current = self.form.get_untracked();
        if current.company.trim().is_empty() {
            self.error.set(Some("Company is required".to_string()));
            return;
        }

        let this = *self;
        this.busy.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let saved = model::save_form(&current).await;
            this.busy.set(false);
            match saved {
                Ok(id) => {
                    log::info!("phase 1 settings {} saved", id);
                    this.error.set(None);
                    this.form.update(|f| f.id = Some(id));
                    this.notices.push(Notice::success("Phase 1 settings saved"));
                    on_saved.run(());
                }
                // server side conflicts (active phase 2 settings) land here
                Err(e) => this.error.set(Some(e)),
            }
        });
    }
}
