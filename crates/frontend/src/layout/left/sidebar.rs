//! Sidebar with the menu of forms and the feedback action

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::icons::icon;
use crate::shared::notices::use_notices;
use crate::usecases::u501_feedback::FeedbackLauncher;
use contracts::domain::a001_business_settings::aggregate::BusinessSettings;
use contracts::domain::a002_phase1_business_settings::aggregate::Phase1BusinessSettings;
use contracts::domain::a005_invoice_fix_rejection::aggregate::InvoiceFixRejection;
use contracts::domain::a006_customer::aggregate::Customer;
use contracts::domain::a007_branch::aggregate::Branch;
use contracts::domain::common::AggregateRoot;
use contracts::usecases::u501_feedback::DialogMode;
use leptos::prelude::*;

struct MenuGroup {
    label: &'static str,
    items: Vec<(String, &'static str)>, // (tab key, icon)
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            label: "Settings",
            items: vec![
                (BusinessSettings::full_name(), "building"),
                (Phase1BusinessSettings::full_name(), "building"),
                (Branch::full_name(), "building"),
            ],
        },
        MenuGroup {
            label: "Parties",
            items: vec![(Customer::full_name(), "users")],
        },
        MenuGroup {
            label: "Invoices",
            items: vec![(InvoiceFixRejection::full_name(), "file-text")],
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().unwrap_or_default();
    let launcher = use_context::<FeedbackLauncher>().unwrap_or_default();
    let notices = use_notices();

    let groups = get_menu_groups()
        .into_iter()
        .map(|group| {
            let items = group
                .items
                .into_iter()
                .map(|(key, icon_name)| {
                    let label = tab_label_for_key(&key);
                    view! {
                        <li>
                            <button
                                class="sidebar__item"
                                on:click=move |_| ctx.open_tab(&key, label)
                            >
                                {icon(icon_name)}
                                <span>{label}</span>
                            </button>
                        </li>
                    }
                })
                .collect_view();
            view! {
                <div class="sidebar__group">
                    <div class="sidebar__group-label">{group.label}</div>
                    <ul>{items}</ul>
                </div>
            }
        })
        .collect_view();

    view! {
        <nav class="sidebar">
            {groups}
            <div class="sidebar__footer">
                <button
                    class="sidebar__item"
                    on:click=move |_| launcher.open(notices, String::new(), DialogMode::Standard)
                >
                    {icon("message-square")}
                    <span>{"Send Feedback"}</span>
                </button>
            </div>
        </nav>
    }
}
