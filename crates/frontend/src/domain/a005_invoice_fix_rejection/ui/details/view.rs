use super::view_model::FixRejectionViewModel;
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use crate::shared::notices::use_notices;
use contracts::domain::a005_invoice_fix_rejection::{FixedAmount, InvoiceTotals};
use contracts::enums::InvoiceType;
use leptos::prelude::*;
use thaw::*;

fn totals_rows(totals: InvoiceTotals, fixed: InvoiceTotals) -> impl IntoView {
    let rows = [
        ("Amount without taxes and discount", totals.amount_without_taxes_and_discount, fixed.amount_without_taxes_and_discount),
        ("Discount amount", totals.discount_amount, fixed.discount_amount),
        ("Amount without taxes", totals.amount_without_taxes, fixed.amount_without_taxes),
        ("Tax amount", totals.tax_amount, fixed.tax_amount),
        ("Amount with taxes and discount", totals.amount_with_taxes_and_discount, fixed.amount_with_taxes_and_discount),
    ];
    rows.into_iter()
        .map(|(label, original, fixed)| {
            view! {
                <tr>
                    <td>{label}</td>
                    <td class="num">{original.to_string()}</td>
                    <td class="num">{fixed.to_string()}</td>
                </tr>
            }
        })
        .collect_view()
}

#[component]
pub fn InvoiceFixRejectionDetails(
    id: Option<String>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = FixRejectionViewModel::new(use_notices());
    vm.load(id);

    let locked = move || vm.is_resubmitted() || vm.busy.get();

    view! {
        <div class="details-container fix-rejection-details">
            <div class="details-header">
                <h3>{"ZATCA Invoice Fix Rejection"}</h3>
                {move || vm.saved.get().map(|s| view! {
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Informative>{s.code}</Badge>
                })}
                {move || vm.status.get().map(|status| view! {
                    <span class=format!("indicator {}", status.indicator().css_class())>
                        {status.as_str()}
                    </span>
                })}
            </div>

            {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}
            {move || vm.successor.get().map(|s| view! {
                <div class="info">{format!("Resubmitted, new record {}", s)}</div>
            })}

            <div class="details-form">
                <div class="form-group">
                    <label for="invoice_type">{"Invoice Type"}</label>
                    <select
                        id="invoice_type"
                        prop:value=move || vm.draft.get().invoice_type.label()
                        prop:disabled=locked
                        on:change=move |ev| vm.change_invoice_type(&event_target_value(&ev))
                    >
                        {InvoiceType::all()
                            .into_iter()
                            .map(|t| view! { <option value=t.label()>{t.label()}</option> })
                            .collect_view()}
                    </select>
                </div>

                <div class="form-group">
                    <label for="invoice">{"Rejected Invoice"}</label>
                    <select
                        id="invoice"
                        prop:value=move || vm.draft.get().invoice.unwrap_or_default()
                        prop:disabled=locked
                        on:change=move |ev| vm.select_invoice(event_target_value(&ev))
                    >
                        <option value="">{"Select invoice"}</option>
                        <For
                            each=move || vm.rejected.get()
                            key=|name| name.clone()
                            children=move |name| view! { <option value=name.clone()>{name.clone()}</option> }
                        />
                    </select>
                </div>

                <table class="table table--compact">
                    <thead>
                        <tr>
                            <th>{"Totals"}</th>
                            <th>{"Original"}</th>
                            <th>{"Fixed"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let draft = vm.draft.get();
                            totals_rows(draft.totals, draft.fixed_totals)
                        }}
                    </tbody>
                </table>

                <table class="table table--compact">
                    <thead>
                        <tr>
                            <th>{"Item"}</th>
                            <th>{"Qty"}</th>
                            <th>{"Amount w/o taxes"}</th>
                            <th>{"Tax"}</th>
                            <th>{"Discount"}</th>
                            <th>{"Fixed amount w/o taxes"}</th>
                            <th>{"Fixed tax"}</th>
                            <th>{"Fixed discount"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            vm.draft
                                .get()
                                .items
                                .into_iter()
                                .enumerate()
                                .map(|(index, line)| {
                                    let amount_input = move |column: FixedAmount, value: String| {
                                        view! {
                                            <td>
                                                <input
                                                    type="text"
                                                    class="num"
                                                    prop:value=value
                                                    prop:disabled=locked
                                                    on:change=move |ev| {
                                                        vm.set_fixed_amount(index, column, &event_target_value(&ev))
                                                    }
                                                />
                                            </td>
                                        }
                                    };
                                    view! {
                                        <tr>
                                            <td>{line.item}</td>
                                            <td class="num">{line.qty.to_string()}</td>
                                            <td class="num">{line.amount_without_taxes.to_string()}</td>
                                            <td class="num">{line.tax_amount.to_string()}</td>
                                            <td class="num">{line.discount_amount.to_string()}</td>
                                            {amount_input(FixedAmount::WithoutTaxes, line.fixed_amount_without_taxes.to_string())}
                                            {amount_input(FixedAmount::Tax, line.fixed_tax_amount.to_string())}
                                            {amount_input(FixedAmount::Discount, line.fixed_discount_amount.to_string())}
                                        </tr>
                                    }
                                })
                                .collect_view()
                        }}
                    </tbody>
                </table>

                <div class="form-group">
                    <label for="fix_reason">{"Fix Reason"}</label>
                    <textarea
                        id="fix_reason"
                        prop:value=move || vm.draft.get().fix_reason
                        prop:disabled=locked
                        on:input=move |ev| vm.set_fix_reason(event_target_value(&ev))
                        rows="3"
                    />
                </div>
            </div>

            <div class="details-actions">
                <Button
                    on_click=move |_| vm.save_command()
                    disabled=Signal::derive(locked)
                >
                    {icon("save")}
                    {"Save"}
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| vm.request_fix()
                    disabled=Signal::derive(move || !vm.can_fix())
                >
                    {icon("send")}
                    {"Fix Rejection"}
                </Button>
                <Button on_click=move |_| on_cancel.run(())>
                    {icon("x")}
                    {"Close"}
                </Button>
                {move || vm.busy.get().then(|| view! { <Spinner /> })}
            </div>

            {move || vm.confirming.get().then(|| {
                let draft = vm.draft.get_untracked();
                let invoice = draft.invoice.clone().unwrap_or_default();
                let changed = draft.changed_lines();
                view! {
                    <Modal
                        title="Resubmit invoice".to_string()
                        on_close=Callback::new(move |_| vm.cancel_fix())
                    >
                        <p>
                            {format!(
                                "{} will be queued for resubmission with {} changed line(s). Continue?",
                                invoice, changed
                            )}
                        </p>
                        <div class="modal-actions">
                            <Button appearance=ButtonAppearance::Primary on_click=move |_| vm.confirm_fix()>
                                {"Yes"}
                            </Button>
                            <Button on_click=move |_| vm.cancel_fix()>{"No"}</Button>
                        </div>
                    </Modal>
                }
            })}
        </div>
    }
}
