use serde::{Deserialize, Serialize};

/// Category picked by the user in the feedback dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedbackSubject {
    #[serde(rename = "Bug Report")]
    BugReport,
    #[serde(rename = "Feature Request")]
    FeatureRequest,
    #[serde(rename = "General Feedback")]
    GeneralFeedback,
    #[serde(rename = "Compliance Issue")]
    ComplianceIssue,
    #[serde(rename = "Other")]
    Other,
}

impl FeedbackSubject {
    pub fn label(&self) -> &'static str {
        match self {
            FeedbackSubject::BugReport => "Bug Report",
            FeedbackSubject::FeatureRequest => "Feature Request",
            FeedbackSubject::GeneralFeedback => "General Feedback",
            FeedbackSubject::ComplianceIssue => "Compliance Issue",
            FeedbackSubject::Other => "Other",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.label() == label)
    }

    pub fn all() -> [FeedbackSubject; 5] {
        [
            FeedbackSubject::BugReport,
            FeedbackSubject::FeatureRequest,
            FeedbackSubject::GeneralFeedback,
            FeedbackSubject::ComplianceIssue,
            FeedbackSubject::Other,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(
            FeedbackSubject::from_label("Compliance Issue"),
            Some(FeedbackSubject::ComplianceIssue)
        );
        assert_eq!(FeedbackSubject::from_label(""), None);
        assert_eq!(
            serde_json::to_string(&FeedbackSubject::BugReport).unwrap(),
            "\"Bug Report\""
        );
    }
}
