use super::model;
use crate::shared::notices::NoticeStack;
use contracts::domain::a006_customer::aggregate::{Customer, CustomerDto};
use contracts::shared::notice::Notice;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct CustomerDetailsViewModel {
    pub form: RwSignal<CustomerDto>,
    pub busy: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    notices: NoticeStack,
}

impl CustomerDetailsViewModel {
    pub fn new(notices: NoticeStack) -> Self {
        Self {
            form: RwSignal::new(new_customer_form()),
            busy: RwSignal::new(false),
            error: RwSignal::new(None),
            notices,
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.form.with(|f| f.id.is_some())
    }

    pub fn is_form_valid(&self) -> bool {
        self.form.with(|f| !f.customer_name.trim().is_empty())
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

    fn apply_record(&self, aggregate: &Customer) {
        self.form.set(CustomerDto::from(aggregate));
    }

    pub fn set_additional_id_value(&self, index: usize, value: String) {
        self.form.update(|f| {
            if let Some(row) = f.additional_ids.get_mut(index) {
                row.value = value;
            }
        });
    }

    pub fn remove_additional_id(&self, index: usize) {
        self.form.update(|f| {
            if index < f.additional_ids.len() {
                f.additional_ids.remove(index);
            }
        });
    }

    pub fn save_command(&self, on_saved: Callback<()>) {
        let current = self.form.get_untracked();
        if current.customer_name.trim().is_empty() {
            self.error.set(Some("Customer name is required".to_string()));
            return;
        }

        let this = *self;
        this.busy.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let saved = model::save_form(&current).await;
            this.busy.set(false);
            match saved {
                Ok(id) => {
                    log::info!("customer {} saved", id);
                    this.error.set(None);
                    this.notices.push(Notice::success("Customer saved"));
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

/// Blank form of a customer that was never saved, buyer ids seeded
fn new_customer_form() -> CustomerDto {
    let mut dto = CustomerDto::default();
    dto.seed_additional_ids();
    dto
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_customer_form_lists_buyer_ids() {
        let form = new_customer_form();
        assert_eq!(form.additional_ids.len(), 11);
        assert_eq!(form.additional_ids[0].type_code, "TIN");
        assert!(form.id.is_none());
    }
}
