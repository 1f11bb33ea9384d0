use super::view_model::{BusinessSettingsDetailsViewModel, OtpAction};
use crate::shared::additional_ids::AdditionalIdsTable;
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use crate::shared::notices::use_notices;
use crate::usecases::u501_feedback::FeedbackLauncher;
use contracts::domain::a001_business_settings::aggregate::SyncMode;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn BusinessSettingsDetails(
    id: Option<String>,
    #[prop(into)] on_saved: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = BusinessSettingsDetailsViewModel::new(
        use_notices(),
        use_context::<FeedbackLauncher>(),
    );
    vm.load_companies();
    vm.load_if_needed(id);

    let otp = vm.otp;

    view! {
        <div class="details-container business-settings-details">
            <div class="details-header">
                <h3>
                    {move || if vm.is_edit_mode() { "Edit ZATCA Business Settings" } else { "New ZATCA Business Settings" }}
                </h3>
                {move || vm.record.get().map(|r| view! { <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Informative>{r.base.code}</Badge> })}
            </div>

            {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="details-form">
                <div class="form-group">
                    <label for="company">{"Company"}</label>
                    <select
                        id="company"
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
                    <label for="company_address">{"Company Address"}</label>
                    <select
                        id="company_address"
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

                <div class="form-group">
                    <label for="seller_name">{"Seller Name"}</label>
                    <input
                        type="text"
                        id="seller_name"
                        prop:value=move || vm.form.get().seller_name
                        on:input=move |ev| vm.form.update(|f| f.seller_name = event_target_value(&ev))
                    />
                </div>

                <div class="form-group">
                    <label for="vat_registration_number">{"VAT Registration Number"}</label>
                    <input
                        type="text"
                        id="vat_registration_number"
                        prop:value=move || vm.form.get().vat_registration_number
                        on:input=move |ev| {
                            vm.form.update(|f| f.vat_registration_number = event_target_value(&ev))
                        }
                        maxlength="15"
                    />
                </div>

                <div class="form-group">
                    <label for="fatoora_server_url">{"Fatoora Server URL"}</label>
                    <input
                        type="text"
                        id="fatoora_server_url"
                        prop:value=move || vm.form.get().fatoora_server_url
                        on:input=move |ev| {
                            vm.form.update(|f| f.fatoora_server_url = event_target_value(&ev))
                        }
                        placeholder="https://gw-fatoora.zatca.gov.sa/e-invoicing/simulation"
                    />
                </div>

                <div class="form-group form-group--inline">
                    <input
                        type="checkbox"
                        id="enable_zatca_integration"
                        prop:checked=move || vm.form.get().enable_zatca_integration
                        on:change=move |ev| {
                            vm.form.update(|f| f.enable_zatca_integration = event_target_checked(&ev))
                        }
                    />
                    <label for="enable_zatca_integration">{"Enable ZATCA Integration"}</label>
                </div>

                <div class="form-group form-group--inline">
                    <input
                        type="checkbox"
                        id="enable_branch_configuration"
                        prop:checked=move || vm.form.get().enable_branch_configuration
                        on:change=move |ev| {
                            vm.form.update(|f| f.enable_branch_configuration = event_target_checked(&ev))
                        }
                    />
                    <label for="enable_branch_configuration">{"Enable Branch Configuration"}</label>
                </div>

                <div class="form-group">
                    <label for="sync_with_zatca">{"Sync with ZATCA"}</label>
                    <select
                        id="sync_with_zatca"
                        prop:value=move || vm.form.get().sync_with_zatca.as_str()
                        on:change=move |ev| vm.set_sync_mode(&event_target_value(&ev))
                    >
                        <option value=SyncMode::Live.as_str()>{SyncMode::Live.as_str()}</option>
                        <option value=SyncMode::Batches.as_str()>{SyncMode::Batches.as_str()}</option>
                    </select>
                </div>

                <AdditionalIdsTable
                    label="Other Seller IDs"
                    rows=Signal::derive(move || vm.form.get().other_ids)
                    on_value=Callback::new(move |(index, value): (usize, String)| {
                        vm.set_other_id_value(index, value)
                    })
                    on_remove=Callback::new(move |index: usize| vm.remove_other_id(index))
                />

                <div class="form-group">
                    <label for="comment">{"Comment"}</label>
                    <textarea
                        id="comment"
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
                <Button
                    on_click=move |_| vm.request_otp(OtpAction::Onboard)
                    disabled=Signal::derive(move || vm.record.with(Option::is_none) || vm.busy.get())
                >
                    {icon("key")}
                    {OtpAction::Onboard.title()}
                </Button>
                <Button
                    on_click=move |_| vm.request_otp(OtpAction::ProductionCsid)
                    disabled=Signal::derive(move || vm.record.with(Option::is_none) || vm.busy.get())
                >
                    {icon("key")}
                    {OtpAction::ProductionCsid.title()}
                </Button>
                <Button on_click=move |_| on_cancel.run(())>
                    {icon("x")}
                    {"Close"}
                </Button>
                {move || vm.busy.get().then(|| view! { <Spinner /> })}
            </div>

            <div class="details-footer">
                {move || {
                    if vm.is_onboarded() {
                        "Onboarded: compliance request ID issued"
                    } else {
                        "Not onboarded yet"
                    }
                }}
            </div>

            {move || {
                vm.otp_action
                    .get()
                    .map(|action| {
                        view! {
                            <Modal
                                title=action.title().to_string()
                                on_close=Callback::new(move |_| vm.cancel_otp())
                            >
                                <div class="form-group">
                                    <label>{"OTP"}</label>
                                    <Input value=otp placeholder="One-time password from the Fatoora portal" />
                                </div>
                                <div class="modal-actions">
                                    <Button
                                        appearance=ButtonAppearance::Primary
                                        on_click=move |_| vm.confirm_otp()
                                        disabled=Signal::derive(move || vm.busy.get())
                                    >
                                        {icon("send")}
                                        {"Submit"}
                                    </Button>
                                    <Button on_click=move |_| vm.cancel_otp()>{"Cancel"}</Button>
                                </div>
                            </Modal>
                        }
                    })
            }}
        </div>
    }
}
