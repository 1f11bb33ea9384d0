pub mod global_context;
pub mod left;
pub mod tabs;

use crate::layout::global_context::AppGlobalContext;
use leptos::prelude::*;

/// Main application shell.
///
/// ```text
/// +------------------------------------------+
/// |              Top bar                     |
/// +------------------------------------------+
/// |  Sidebar  |    Tabs + tab content        |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().unwrap_or_default();

    view! {
        <div class="app-layout">
            <div class="top-header">
                <button class="button button--icon" on:click=move |_| ctx.toggle_left()>
                    {"☰"}
                </button>
                <span class="top-header__title">{"ZATCA E-Invoicing"}</span>
            </div>
            <div class="app-body">
                {move || ctx.left_open.get().then(|| view! { <left::Sidebar /> })}
                <div class="app-main">
                    <tabs::TabHost />
                </div>
            </div>
        </div>
    }
}
