/// localStorage key holding the comma-joined list of suppressed documents
pub const SUPPRESSION_STORAGE_KEY: &str = "zatca_feedback_suppressed";

/// Documents for which the post-save feedback prompt must not reappear.
///
/// Persisted client-side as a single comma-joined string. Entries are only
/// ever added (explicit "Don't show again") and never expire. Concurrent
/// writers from several tabs can lose an entry; the record is advisory, so
/// the worst case is one extra prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuppressionRecord {
    ids: Vec<String>,
}

impl SuppressionRecord {
    /// Parses the stored form, skipping blank segments and duplicates
    pub fn parse(raw: &str) -> Self {
        let mut record = Self::default();
        for id in raw.split(',') {
            record.insert(id);
        }
        record
    }

    pub fn serialize(&self) -> String {
        self.ids.join(",")
    }

    pub fn contains(&self, document_id: &str) -> bool {
        let document_id = document_id.trim();
        self.ids.iter().any(|id| id == document_id)
    }

    /// Returns `false` when the id was blank, unrepresentable or already present
    pub fn insert(&mut self, document_id: &str) -> bool {
        let document_id = document_id.trim();
        if document_id.is_empty() || document_id.contains(',') || self.contains(document_id) {
            return false;
        }
        self.ids.push(document_id.to_string());
        true
    }

    pub fn should_prompt(&self, document_id: &str) -> bool {
        !self.contains(document_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_blanks_and_duplicates() {
        let record = SuppressionRecord::parse("BS-1,, BS-2 ,BS-1,");
        assert_eq!(record.len(), 2);
        assert_eq!(record.serialize(), "BS-1,BS-2");
    }

    #[test]
    fn test_empty_storage() {
        let record = SuppressionRecord::parse("");
        assert!(record.is_empty());
        assert_eq!(record.serialize(), "");
    }

    #[test]
    fn test_suppression_round_trip() {
        let mut record = SuppressionRecord::default();
        assert!(record.insert("X"));
        let reloaded = SuppressionRecord::parse(&record.serialize());
        assert!(!reloaded.should_prompt("X"));
        assert!(reloaded.should_prompt("Y"));
    }

    #[test]
    fn test_insert_rejects_unrepresentable_ids() {
        let mut record = SuppressionRecord::default();
        assert!(!record.insert("  "));
        assert!(!record.insert("a,b"));
        assert!(record.insert("a"));
        assert!(!record.insert("a"));
    }
}
