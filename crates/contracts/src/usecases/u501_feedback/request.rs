use serde::{Deserialize, Serialize};

use super::subject::FeedbackSubject;

/// Raw form values of the feedback dialog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackDraft {
    pub subject: Option<FeedbackSubject>,
    pub description: String,
    /// Optional reply address typed by the user; blank means "let the server decide"
    #[serde(default)]
    pub contact_email: String,
}

impl FeedbackDraft {
    pub fn sender_email(&self) -> Option<String> {
        let email = self.contact_email.trim();
        if email.is_empty() {
            None
        } else {
            Some(email.to_string())
        }
    }
}

/// Body of the `sendFeedbackEmail` call.
///
/// When `sender_email` is absent the server falls back to its default
/// outgoing account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendFeedbackRequest {
    #[serde(default)]
    pub sender_email: Option<String>,
    pub company: String,
    pub subject: FeedbackSubject,
    pub description: String,
    #[serde(default)]
    pub attachments: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_contact_email_is_none() {
        let draft = FeedbackDraft {
            contact_email: "   ".into(),
            ..Default::default()
        };
        assert_eq!(draft.sender_email(), None);

        let draft = FeedbackDraft {
            contact_email: " ops@example.com ".into(),
            ..Default::default()
        };
        assert_eq!(draft.sender_email().as_deref(), Some("ops@example.com"));
    }

    #[test]
    fn test_request_defaults() {
        let json = r#"{"company":"ACME","subject":"Other","description":"hi"}"#;
        let req: SendFeedbackRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.sender_email, None);
        assert!(req.attachments.is_empty());
    }
}
