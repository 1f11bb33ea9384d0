use serde::{Deserialize, Serialize};

/// `name in [...]` restriction of a link field's options
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LinkFilter {
    pub allowed: Vec<String>,
}

impl LinkFilter {
    pub fn new(allowed: Vec<String>) -> Self {
        Self { allowed }
    }

    pub fn allows(&self, name: &str) -> bool {
        self.allowed.iter().any(|a| a == name)
    }

    /// Keeps the current value only if it is still selectable
    pub fn retain_selection(&self, current: &str) -> String {
        if self.allows(current) {
            current.to_string()
        } else {
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_filter() {
        let filter = LinkFilter::new(vec!["ACME-Billing".into(), "ACME-Warehouse".into()]);
        assert!(filter.allows("ACME-Billing"));
        assert!(!filter.allows("Other-Billing"));
        assert_eq!(filter.retain_selection("Other-Billing"), "");
        assert_eq!(filter.retain_selection("ACME-Warehouse"), "ACME-Warehouse");
        assert!(!LinkFilter::default().allows(""));
    }
}
