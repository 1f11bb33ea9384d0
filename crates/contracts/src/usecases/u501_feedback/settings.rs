use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::attachments::UploadRestrictions;

/// Limits and links fetched from the server each time the feedback dialog opens.
///
/// Immutable for the lifetime of one dialog session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackSettings {
    pub max_files: usize,
    pub max_file_size_mb: f64,
    /// Lowercase extensions including the dot, e.g. ".pdf"
    pub allowed_file_types: BTreeSet<String>,
    pub max_description_length: usize,
    pub contact_url: String,
    #[serde(default)]
    pub default_sender_email: Option<String>,
}

impl FeedbackSettings {
    pub fn max_file_size_bytes(&self) -> u64 {
        (self.max_file_size_mb * 1024.0 * 1024.0) as u64
    }

    /// Restrictions handed to the uploader
    pub fn upload_restrictions(&self) -> UploadRestrictions {
        UploadRestrictions::new(
            self.allowed_file_types.iter().cloned(),
            self.max_file_size_bytes(),
            self.max_files,
        )
    }

    /// Hint rendered next to the upload button
    pub fn upload_notes(&self) -> String {
        let types: Vec<String> = self
            .allowed_file_types
            .iter()
            .map(|t| t.trim_start_matches('.').to_uppercase())
            .collect();
        format!(
            "Upload up to {} files ({}), max {}MB each",
            self.max_files,
            types.join(", "),
            self.max_file_size_mb
        )
    }

    /// Hint rendered under the description field
    pub fn description_hint(&self) -> String {
        format!("Maximum {} characters", self.max_description_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> FeedbackSettings {
        FeedbackSettings {
            max_files: 3,
            max_file_size_mb: 5.0,
            allowed_file_types: [".pdf", ".png", ".jpeg", ".docx"]
                .into_iter()
                .map(String::from)
                .collect(),
            max_description_length: 500,
            contact_url: "https://lavaloon.com/contact-us".into(),
            default_sender_email: None,
        }
    }

    #[test]
    fn test_size_in_bytes() {
        assert_eq!(settings().max_file_size_bytes(), 5 * 1024 * 1024);
    }

    #[test]
    fn test_upload_notes() {
        assert_eq!(
            settings().upload_notes(),
            "Upload up to 3 files (DOCX, JPEG, PDF, PNG), max 5MB each"
        );
        assert_eq!(settings().description_hint(), "Maximum 500 characters");
    }

    #[test]
    fn test_deserialize_without_sender() {
        let json = r#"{
            "max_files": 3,
            "max_file_size_mb": 5,
            "allowed_file_types": [".pdf"],
            "max_description_length": 500,
            "contact_url": "https://example.com"
        }"#;
        let parsed: FeedbackSettings = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.default_sender_email, None);
        assert_eq!(parsed.max_file_size_mb, 5.0);
    }
}
