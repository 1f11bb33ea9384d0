use super::view_model::CustomerDetailsViewModel;
use crate::shared::additional_ids::AdditionalIdsTable;
use crate::shared::icons::icon;
use crate::shared::notices::use_notices;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn CustomerDetails(
    id: Option<String>,
    #[prop(into)] on_saved: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = CustomerDetailsViewModel::new(use_notices());
    vm.load_if_needed(id);

    view! {
        <div class="details-container customer-details">
            <div class="details-header">
                <h3>{move || if vm.is_edit_mode() { "Edit Customer" } else { "New Customer" }}</h3>
            </div>

            {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="details-form">
                <div class="form-group">
                    <label for="customer_name">{"Customer Name"}</label>
                    <input
                        type="text"
                        id="customer_name"
                        prop:value=move || vm.form.get().customer_name
                        on:input=move |ev| vm.form.update(|f| f.customer_name = event_target_value(&ev))
                    />
                </div>

                <div class="form-group">
                    <label for="customer_vat">{"VAT Registration Number"}</label>
                    <input
                        type="text"
                        id="customer_vat"
                        prop:value=move || vm.form.get().vat_registration_number
                        on:input=move |ev| {
                            vm.form.update(|f| f.vat_registration_number = event_target_value(&ev))
                        }
                        maxlength="15"
                    />
                </div>

                <AdditionalIdsTable
                    label="Buyer IDs"
                    rows=Signal::derive(move || vm.form.get().additional_ids)
                    on_value=Callback::new(move |(index, value): (usize, String)| {
                        vm.set_additional_id_value(index, value)
                    })
                    on_remove=Callback::new(move |index: usize| vm.remove_additional_id(index))
                />

                <div class="form-group">
                    <label for="customer_comment">{"Comment"}</label>
                    <textarea
                        id="customer_comment"
                        prop:value=move || vm.form.get().comment.unwrap_or_default()
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            vm.form.update(|f| {
                                f.comment = if value.is_empty() { None } else { Some(value) };
                            });
                        }
                        rows="3"
                    />
                </div>
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
