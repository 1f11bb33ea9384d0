//! Editable table of a party's identification numbers

use crate::shared::icons::icon;
use contracts::domain::common::AdditionalId;
use leptos::prelude::*;

/// Rows keep their type; only the value is edited. Without `on_remove` the
/// table has a fixed set of rows.
#[component]
pub fn AdditionalIdsTable(
    #[prop(into)] label: String,
    #[prop(into)] rows: Signal<Vec<AdditionalId>>,
    #[prop(into)] on_value: Callback<(usize, String)>,
    #[prop(optional, into)] on_remove: Option<Callback<usize>>,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label>{label}</label>
            <table class="table table--compact">
                <thead>
                    <tr>
                        <th>{"Type"}</th>
                        <th>{"Code"}</th>
                        <th>{"Value"}</th>
                        {on_remove.map(|_| view! { <th></th> })}
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        rows.get()
                            .into_iter()
                            .enumerate()
                            .map(|(index, row)| {
                                view! {
                                    <tr>
                                        <td>{row.type_name}</td>
                                        <td>{row.type_code}</td>
                                        <td>
                                            <input
                                                type="text"
                                                prop:value=row.value
                                                on:change=move |ev| {
                                                    on_value.run((index, event_target_value(&ev)))
                                                }
                                            />
                                        </td>
                                        {on_remove.map(|remove| view! {
                                            <td>
                                                <button
                                                    class="btn btn-icon"
                                                    title="Remove row"
                                                    on:click=move |_| remove.run(index)
                                                >
                                                    {icon("x")}
                                                </button>
                                            </td>
                                        })}
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>
        </div>
    }
}
