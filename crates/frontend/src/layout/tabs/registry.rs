//! Maps a tab key to its content

use super::tab_labels::form_tabs;
use crate::domain::a001_business_settings::ui::details::BusinessSettingsDetails;
use crate::domain::a002_phase1_business_settings::ui::details::Phase1BusinessSettingsDetails;
use crate::domain::a005_invoice_fix_rejection::ui::details::InvoiceFixRejectionDetails;
use crate::domain::a006_customer::ui::details::CustomerDetails;
use crate::domain::a007_branch::ui::details::BranchDetails;
use crate::layout::global_context::AppGlobalContext;
use leptos::prelude::*;

/// Keys are `<form>` for a new record or `<form>_<id>` for an existing one
fn split_key(key: &str) -> (String, Option<String>) {
    for (form, _) in form_tabs() {
        if key == form {
            return (form, None);
        }
        if let Some(id) = key.strip_prefix(form.as_str()).and_then(|rest| rest.strip_prefix('_')) {
            return (form, Some(id.to_string()));
        }
    }
    (key.to_string(), None)
}

pub fn render_tab_content(key: &str, ctx: AppGlobalContext) -> AnyView {
    let owned_key = key.to_string();
    let on_close = Callback::new(move |_| ctx.close_tab(&owned_key));
    let on_saved = Callback::new(|_| ());

    let (form, id) = split_key(key);
    match form.as_str() {
        "a001_business_settings" => view! {
            <BusinessSettingsDetails id=id on_saved=on_saved on_cancel=on_close />
        }
        .into_any(),
        "a002_phase1_business_settings" => view! {
            <Phase1BusinessSettingsDetails id=id on_saved=on_saved on_cancel=on_close />
        }
        .into_any(),
        "a005_invoice_fix_rejection" => view! {
            <InvoiceFixRejectionDetails id=id on_cancel=on_close />
        }
        .into_any(),
        "a006_customer" => view! {
            <CustomerDetails id=id on_saved=on_saved on_cancel=on_close />
        }
        .into_any(),
        "a007_branch" => view! {
            <BranchDetails id=id on_saved=on_saved on_cancel=on_close />
        }
        .into_any(),
        _ => {
            log::warn!("no content registered for tab '{}'", key);
            view! { <div class="tabs__empty">{format!("Unknown tab: {}", key)}</div> }.into_any()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_key() {
        assert_eq!(
            split_key("a001_business_settings"),
            ("a001_business_settings".to_string(), None)
        );
        assert_eq!(
            split_key("a005_invoice_fix_rejection_42"),
            ("a005_invoice_fix_rejection".to_string(), Some("42".to_string()))
        );
        assert_eq!(
            split_key("a007_branch_9f1c"),
            ("a007_branch".to_string(), Some("9f1c".to_string()))
        );
        assert_eq!(split_key("other"), ("other".to_string(), None));
    }
}
