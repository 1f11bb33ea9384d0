use serde::{Deserialize, Serialize};

/// Legal entity issuing invoices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Company name, also its key
    pub name: String,
    #[serde(default)]
    pub vat_registration_number: String,
}

/// Address linked to a company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyAddress {
    pub id: String,
    pub company: String,
    pub address_line: String,
    pub is_primary: bool,
}

/// Company used when an action has none: the configured one while it
/// exists, else the first company by name
pub fn default_company(configured: Option<&str>, companies: &[Company]) -> Option<String> {
    let configured = configured.map(str::trim).filter(|c| !c.is_empty());
    if let Some(name) = configured {
        if companies.iter().any(|c| c.name == name) {
            return Some(name.to_string());
        }
    }
    companies.iter().map(|c| &c.name).min().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company(name: &str) -> Company {
        Company {
            name: name.into(),
            vat_registration_number: String::new(),
        }
    }

    #[test]
    fn test_default_company() {
        let companies = [company("Desert Trading"), company("ACME KSA")];
        assert_eq!(
            default_company(Some("Desert Trading"), &companies),
            Some("Desert Trading".into())
        );
        assert_eq!(default_company(Some("Gone Co"), &companies), Some("ACME KSA".into()));
        assert_eq!(default_company(None, &companies), Some("ACME KSA".into()));
        assert_eq!(default_company(Some("ACME KSA"), &[]), None);
    }
}
