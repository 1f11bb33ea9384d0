use super::view_model::BranchDetailsViewModel;
use crate::shared::additional_ids::AdditionalIdsTable;
use crate::shared::icons::icon;
use crate::shared::notices::use_notices;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn BranchDetails(
    id: Option<String>,
    #[prop(into)] on_saved: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = BranchDetailsViewModel::new(use_notices());
    vm.load_companies();
    vm.load_if_needed(id);

    view! {
        <div class="details-container branch-details">
            <div class="details-header">
                <h3>{move || if vm.is_edit_mode() { "Edit Branch" } else { "New Branch" }}</h3>
            </div>

            {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="details-form">
                <div class="form-group">
                    <label for="branch_name">{"Branch"}</label>
                    <input
                        type="text"
                        id="branch_name"
                        prop:value=move || vm.form.get().branch_name
                        on:input=move |ev| vm.form.update(|f| f.branch_name = event_target_value(&ev))
                    />
                </div>

                <div class="form-group">
                    <label for="branch_company">{"Company"}</label>
                    <select
                        id="branch_company"
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
                    <label for="branch_company_address">{"Company Address"}</label>
                    <select
                        id="branch_company_address"
                        prop:value=move || vm.form.get().company_address
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            if value.is_empty() || vm.address_filter.with_untracked(|f| f.allows(&value)) {
                                vm.form.update(|f| f.company_address = value);
                            }
                        }
                    >
                        <option value="">{"Select address"}</option>
                        <For
                            each=move || vm.address_filter.get().allowed
                            key=|a| a.clone()
                            children=move |a| view! { <option value=a.clone()>{a.clone()}</option> }
                        />
                    </select>
                </div>

                <AdditionalIdsTable
                    label="Branch IDs"
                    rows=Signal::derive(move || vm.form.get().branch_ids)
                    on_value=Callback::new(move |(index, value): (usize, String)| {
                        vm.set_branch_id_value(index, value)
                    })
                />
            </div>

            <div class="details-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| vm.save_command(on_saved)
                    disabled=Signal::derive(move || !vm.is_form_valid() || vm.busy.get())
                >
                    {icon("save")}
                    {move || if vm.is_edit_mode() { "Save" } else { "Create" }}
                </Button>
                <Button on_click=move |_| on_cancel.run(())>
                    {icon("x")}
                    {"Close"}
                </Button>
                {move || vm.busy.get().then(|| view! { <Spinner /> })}
            </div>
        </div>
    }
}
