use super::model;
use crate::domain::a003_company;
use crate::shared::notices::NoticeStack;
use contracts::domain::a003_company::Company;
use contracts::domain::a007_branch::aggregate::{Branch, BranchDto};
use contracts::domain::common::LinkFilter;
use contracts::shared::notice::Notice;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct BranchDetailsViewModel {
    pub form: RwSignal<BranchDto>,
    pub companies: RwSignal<Vec<Company>>,
    pub address_filter: RwSignal<LinkFilter>,
    pub busy: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    notices: NoticeStack,
}

impl BranchDetailsViewModel {
    pub fn new(notices: NoticeStack) -> Self {
        let mut dto = BranchDto::default();
        dto.seed_branch_ids();
        Self {
            form: RwSignal::new(dto),
            companies: RwSignal::new(Vec::new()),
            address_filter: RwSignal::new(LinkFilter::default()),
            busy: RwSignal::new(false),
            error: RwSignal::new(None),
            notices,
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.form.with(|f| f.id.is_some())
    }

    pub fn is_form_valid(&self) -> bool {
        self.form.with(has_required_fields)
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
        let this = *self;
        wasm_bindgen_futures::spawn_local(async move {
            match model::fetch_by_id(&existing_id).await {
                Ok(aggregate) => this.apply_record(&aggregate),
                Err(e) => this.error.set(Some(format!("Failed to load: {}", e))),
            }
        });
    }

    fn apply_record(&self, aggregate: &Branch) {
        let mut dto = BranchDto::from(aggregate);
        dto.seed_branch_ids();
        let company = dto.company.clone();
        self.form.set(dto);
        self.refresh_address_filter(company);
    }

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

    /// Rows of the branch id table are fixed; only values change
    pub fn set_branch_id_value(&self, index: usize, value: String) {
        self.form.update(|f| {
            if let Some(row) = f.branch_ids.get_mut(index) {
                row.value = value;
            }
        });
    }

    pub fn save_command(&self, on_saved: Callback<()>) {
        let current = self.form.get_untracked();
        if !has_required_fields(&current) {
            self.error
                .set(Some("Branch and company are required".to_string()));
            return;
        }

        let this = *self;
        this.busy.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let saved = model::save_form(&current).await;
            this.busy.set(false);
            match saved {
                Ok(id) => {
                    log::info!("branch {} saved", id);
                    this.error.set(None);
                    this.notices.push(Notice::success("Branch saved"));
                    match model::fetch_by_id(&id).await {
                        Ok(aggregate) => this.apply_record(&aggregate),
                        Err(e) => log::warn!("reload after save failed: {}", e),
                    }
                    on_saved.run(());
                }
                Err(e) => this.error.set(Some(e)),
            }
        });
    }
}

fn has_required_fields(form: &BranchDto) -> bool {
    !form.branch_name.trim().is_empty() && !form.company.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields() {
        let mut form = BranchDto {
            branch_name: "Jeddah".into(),
            ..Default::default()
        };
        assert!(!has_required_fields(&form));
        form.company = "ACME KSA".into();
        assert!(has_required_fields(&form));
    }
}
