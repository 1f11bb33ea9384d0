use contracts::domain::a001_business_settings::aggregate::BusinessSettings;
use contracts::domain::a002_phase1_business_settings::aggregate::Phase1BusinessSettings;
use contracts::domain::a005_invoice_fix_rejection::aggregate::InvoiceFixRejection;
use contracts::domain::a006_customer::aggregate::Customer;
use contracts::domain::a007_branch::aggregate::Branch;
use contracts::domain::common::AggregateRoot;

/// Tab key and title of every form that opens in a tab
pub fn form_tabs() -> Vec<(String, &'static str)> {
    vec![
        (BusinessSettings::full_name(), BusinessSettings::element_name()),
        (
            Phase1BusinessSettings::full_name(),
            Phase1BusinessSettings::element_name(),
        ),
        (InvoiceFixRejection::full_name(), InvoiceFixRejection::element_name()),
        (Customer::full_name(), Customer::element_name()),
        (Branch::full_name(), Branch::element_name()),
    ]
}

/// Title of a tab opened from the menu
pub fn tab_label_for_key(key: &str) -> &'static str {
    form_tabs()
        .into_iter()
        .find(|(form, _)| form == key)
        .map(|(_, title)| title)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels() {
        assert_eq!(
            tab_label_for_key("a005_invoice_fix_rejection"),
            "ZATCA Invoice Fix Rejection"
        );
        assert_eq!(tab_label_for_key("a007_branch"), "Branch");
        assert_eq!(tab_label_for_key("p999"), "Unknown");
    }
}
