use super::view_model::Phase1DetailsViewModel;
use crate::shared::icons::icon;
use crate::shared::notices::use_notices;
use contracts::domain::a002_phase1_business_settings::aggregate::{Phase1Status, TransactionType};
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn Phase1BusinessSettingsDetails(
    id: Option<String>,
    #[prop(into)] on_saved: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = Phase1DetailsViewModel::new(use_notices());
    vm.load_companies();
    vm.load_if_needed(id);

    view! {
        <div class="details-container phase1-settings-details">
            <div class="details-header">
                <h3>
                    {move || if vm.is_edit_mode() { "Edit ZATCA Phase 1 Settings" } else { "New ZATCA Phase 1 Settings" }}
                </h3>
            </div>

            {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="details-form">
                <div class="form-group">
                    <label for="p1_company">{"Company"}</label>
                    <select
                        id="p1_company"
                        prop:value=move || vm.form.get().company
                        on:change=move |ev| vm.change_company(event_target_value(&ev))
                    >
                        <option value="">{"Select company"}</option>
                        <For
                            each=move || vm.companies.get()
                            key=|c| c.name.clone()
                            children=move |c| {
                                let name = c.name.clone();
                                view! { <option value=name.clone()>{name.clone()}</option> }
                            }
                        />
                    </select>
                </div>

                <div class="form-group">
                    <label for="p1_address">{"Address"}</label>
                    <input
                        type="text"
                        id="p1_address"
                        readonly=true
                        prop:value=move || vm.form.get().address
                        placeholder="Primary address of the company"
                    />
                </div>

                <div class="form-group">
                    <label for="p1_status">{"Status"}</label>
                    <select
                        id="p1_status"
                        prop:value=move || vm.form.get().status.as_str()
                        on:change=move |ev| vm.set_status(&event_target_value(&ev))
                    >
                        <option value=Phase1Status::Active.as_str()>{Phase1Status::Active.as_str()}</option>
                        <option value=Phase1Status::Disabled.as_str()>{Phase1Status::Disabled.as_str()}</option>
                    </select>
                </div>

                <div class="form-group">
                    <label for="p1_type">{"Type of Transaction"}</label>
                    <select
                        id="p1_type"
                        prop:value=move || vm.form.get().type_of_transaction.as_str()
                        on:change=move |ev| vm.set_transaction_type(&event_target_value(&ev))
                    >
                        {TransactionType::all()
                            .into_iter()
                            .map(|kind| view! { <option value=kind.as_str()>{kind.as_str()}</option> })
                            .collect_view()}
                    </select>
                </div>

                <div class="form-group">
                    <label for="p1_vat">{"VAT Registration Number"}</label>
                    <input
                        type="text"
                        id="p1_vat"
                        prop:value=move || vm.form.get().vat_registration_number
                        on:input=move |ev| {
                            vm.form.update(|f| f.vat_registration_number = event_target_value(&ev))
                        }
                        maxlength="15"
                    />
                </div>
            </div>

            <div class="details-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| vm.save_command(on_saved)
                    disabled=Signal::derive(move || vm.busy.get())
                >
                    {icon("save")}
                    {move || if vm.is_edit_mode() { "Save" } else { "Create" }}
                </Button>
                <Button on_click=move |_| on_cancel.run(())>
                    {icon("x")}
                    {"Close"}
                </Button>
            </div>
        </div>
    }
}
