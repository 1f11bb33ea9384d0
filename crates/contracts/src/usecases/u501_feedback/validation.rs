use crate::shared::errors::ValidationError;

use super::attachments::AttachmentRef;
use super::request::FeedbackDraft;
use super::settings::FeedbackSettings;

/// Checks the form values against the fetched limits.
///
/// Order: subject present, description present, description length,
/// contact email shape. The first failing check wins.
pub fn validate(draft: &FeedbackDraft, config: &FeedbackSettings) -> Result<(), ValidationError> {
    if draft.subject.is_none() {
        return Err(ValidationError::MissingSubject);
    }
    if draft.description.trim().is_empty() {
        return Err(ValidationError::MissingDescription);
    }

    let length = draft.description.chars().count();
    if length > config.max_description_length {
        return Err(ValidationError::DescriptionTooLong {
            length,
            max: config.max_description_length,
        });
    }

    if let Some(email) = draft.sender_email() {
        if !looks_like_email(&email) {
            return Err(ValidationError::InvalidEmail(email));
        }
    }

    Ok(())
}

/// [`validate`] plus a re-check of the staged attachment count at submit time
pub fn validate_submission(
    draft: &FeedbackDraft,
    attachments: &[AttachmentRef],
    config: &FeedbackSettings,
) -> Result<(), ValidationError> {
    validate(draft, config)?;
    if attachments.len() > config.max_files {
        return Err(ValidationError::TooManyAttachments {
            count: attachments.len(),
            max: config.max_files,
        });
    }
    Ok(())
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::u501_feedback::subject::FeedbackSubject;

    fn config(max_description_length: usize) -> FeedbackSettings {
        FeedbackSettings {
            max_files: 2,
            max_file_size_mb: 5.0,
            allowed_file_types: [".pdf".to_string()].into_iter().collect(),
            max_description_length,
            contact_url: String::new(),
            default_sender_email: None,
        }
    }

    fn draft(description: &str) -> FeedbackDraft {
        FeedbackDraft {
            subject: Some(FeedbackSubject::BugReport),
            description: description.to_string(),
            contact_email: String::new(),
        }
    }

    #[test]
    fn test_description_length_boundary() {
        let cfg = config(500);
        assert_eq!(validate(&draft(&"a".repeat(500)), &cfg), Ok(()));
        assert_eq!(
            validate(&draft(&"a".repeat(501)), &cfg),
            Err(ValidationError::DescriptionTooLong { length: 501, max: 500 })
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // Arabic letters are two bytes each in UTF-8
        let cfg = config(4);
        assert!(validate(&draft("فاتورة"), &cfg).is_err());
        assert_eq!(validate(&draft("فتور"), &cfg), Ok(()));
    }

    #[test]
    fn test_length_rule_independent_of_attachments() {
        let cfg = config(10);
        let one = [AttachmentRef::from_url("/files/a.pdf")];
        assert_eq!(validate_submission(&draft("short"), &one, &cfg), Ok(()));
        assert!(matches!(
            validate_submission(&draft(&"x".repeat(11)), &one, &cfg),
            Err(ValidationError::DescriptionTooLong { .. })
        ));
    }

    #[test]
    fn test_first_failing_check_wins() {
        let cfg = config(3);
        let empty = FeedbackDraft::default();
        assert_eq!(validate(&empty, &cfg), Err(ValidationError::MissingSubject));

        let no_description = FeedbackDraft {
            subject: Some(FeedbackSubject::Other),
            description: "  ".into(),
            contact_email: String::new(),
        };
        assert_eq!(
            validate(&no_description, &cfg),
            Err(ValidationError::MissingDescription)
        );
    }

    #[test]
    fn test_contact_email_shape() {
        let cfg = config(100);
        let mut d = draft("hello");
        d.contact_email = "not-an-email".into();
        assert_eq!(
            validate(&d, &cfg),
            Err(ValidationError::InvalidEmail("not-an-email".into()))
        );
        d.contact_email = "ops@example.sa".into();
        assert_eq!(validate(&d, &cfg), Ok(()));
    }

    #[test]
    fn test_attachment_count_rechecked_at_submit() {
        let cfg = config(100);
        let three: Vec<AttachmentRef> = (0..3)
            .map(|i| AttachmentRef::from_url(format!("/files/{}.pdf", i)))
            .collect();
        assert_eq!(
            validate_submission(&draft("ok"), &three, &cfg),
            Err(ValidationError::TooManyAttachments { count: 3, max: 2 })
        );
    }
}
