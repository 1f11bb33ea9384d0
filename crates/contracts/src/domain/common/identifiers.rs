use serde::{Deserialize, Serialize};

/// Canonical kind of an identification number (seller or buyer side)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentifierType {
    pub type_name: &'static str,
    pub type_code: &'static str,
}

/// One row of the "other ids" table of a party
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AdditionalId {
    pub type_name: String,
    pub type_code: String,
    #[serde(default)]
    pub value: String,
}

impl AdditionalId {
    pub fn blank(kind: &IdentifierType) -> Self {
        Self {
            type_name: kind.type_name.to_string(),
            type_code: kind.type_code.to_string(),
            value: String::new(),
        }
    }
}

/// Fills `rows` with one blank entry per canonical type, only when empty.
///
/// Returns `true` when rows were added. A table with at least one row is
/// never touched, so user edits and deletions of single rows survive.
pub fn seed_if_empty(rows: &mut Vec<AdditionalId>, kinds: &[IdentifierType]) -> bool {
    if !rows.is_empty() {
        return false;
    }
    rows.extend(kinds.iter().map(AdditionalId::blank));
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    const KINDS: [IdentifierType; 2] = [
        IdentifierType {
            type_name: "Commercial Registration Number",
            type_code: "CRN",
        },
        IdentifierType {
            type_name: "Other ID",
            type_code: "OTH",
        },
    ];

    #[test]
    fn test_seed_once() {
        let mut rows = Vec::new();
        assert!(seed_if_empty(&mut rows, &KINDS));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].type_code, "CRN");
        assert!(rows[0].value.is_empty());

        assert!(!seed_if_empty(&mut rows, &KINDS));
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_partial_table_is_kept() {
        let mut rows = vec![AdditionalId {
            type_name: "Other ID".into(),
            type_code: "OTH".into(),
            value: "123".into(),
        }];
        assert!(!seed_if_empty(&mut rows, &KINDS));
        assert_eq!(rows.len(), 1);
    }
}
