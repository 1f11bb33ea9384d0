use serde::{Deserialize, Serialize};

/// Document type a ZATCA additional-fields record was generated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InvoiceType {
    #[default]
    #[serde(rename = "Sales Invoice")]
    SalesInvoice,
    #[serde(rename = "POS Invoice")]
    PosInvoice,
}

impl InvoiceType {
    pub fn label(&self) -> &'static str {
        match self {
            InvoiceType::SalesInvoice => "Sales Invoice",
            InvoiceType::PosInvoice => "POS Invoice",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Sales Invoice" => Some(InvoiceType::SalesInvoice),
            "POS Invoice" => Some(InvoiceType::PosInvoice),
            _ => None,
        }
    }

    pub fn all() -> [InvoiceType; 2] {
        [InvoiceType::SalesInvoice, InvoiceType::PosInvoice]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_roundtrip_and_serde() {
        for t in InvoiceType::all() {
            assert_eq!(InvoiceType::from_label(t.label()), Some(t));
        }
        assert_eq!(
            serde_json::to_string(&InvoiceType::PosInvoice).unwrap(),
            "\"POS Invoice\""
        );
        assert_eq!(InvoiceType::from_label("Purchase Invoice"), None);
    }
}
