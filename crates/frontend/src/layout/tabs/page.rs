//! Tab bar and the pages of the opened tabs.
//!
//! Every opened tab keeps its page mounted; inactive pages are hidden so
//! unsaved form state survives switching tabs.

use super::registry::render_tab_content;
use crate::layout::global_context::{AppGlobalContext, Tab};
use leptos::prelude::*;

#[component]
fn TabPage(tab: Tab, ctx: AppGlobalContext) -> impl IntoView {
    let key = tab.key.clone();
    let is_active = move || ctx.active.with(|a| a.as_deref() == Some(key.as_str()));
    let content = render_tab_content(&tab.key, ctx);

    view! {
        <div
            class=move || if is_active() { "tabs__item" } else { "tabs__item tabs__item--hidden" }
            data-tab-key=tab.key
        >
            {content}
        </div>
    }
}

#[component]
pub fn TabHost() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().unwrap_or_default();

    view! {
        <div class="tabs">
            <div class="tabs__bar">
                <For
                    each=move || ctx.opened.get()
                    key=|tab| tab.key.clone()
                    children=move |tab| {
                        let activate_key = tab.key.clone();
                        let close_key = tab.key.clone();
                        let active_key = tab.key.clone();
                        view! {
                            <div
                                class=move || {
                                    if ctx.active.with(|a| a.as_deref() == Some(active_key.as_str())) {
                                        "tabs__tab tabs__tab--active"
                                    } else {
                                        "tabs__tab"
                                    }
                                }
                                on:click=move |_| ctx.activate_tab(&activate_key)
                            >
                                <span>{tab.title}</span>
                                <button
                                    class="tabs__close"
                                    on:click=move |ev| {
                                        ev.stop_propagation();
                                        ctx.close_tab(&close_key);
                                    }
                                >
                                    {"×"}
                                </button>
                            </div>
                        }
                    }
                />
            </div>
            <For
                each=move || ctx.opened.get()
                key=|tab| tab.key.clone()
                children=move |tab| view! { <TabPage tab=tab ctx=ctx /> }
            />
            {move || {
                ctx.opened
                    .with(Vec::is_empty)
                    .then(|| view! { <div class="tabs__empty">{"Open a form from the menu"}</div> })
            }}
        </div>
    }
}
