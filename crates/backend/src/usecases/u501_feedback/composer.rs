use contracts::shared::errors::WorkflowError;
use contracts::usecases::u501_feedback::{
    validation::validate, FeedbackDraft, FeedbackSettings, SendFeedbackRequest,
};

/// Metadata of a stored attachment needed to re-validate it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAttachment {
    pub url: String,
    pub file_name: String,
    pub file_size: u64,
}

/// Ready-to-send feedback message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackEmail {
    pub sender: String,
    pub recipients: Vec<String>,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

/// Explicit sender, else the configured default account, else the SMTP
/// `from` address
pub fn resolve_sender(
    explicit: Option<&str>,
    configured_default: Option<&str>,
    smtp_from: &str,
) -> Option<String> {
    [explicit, configured_default, Some(smtp_from)]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Multi-line user text as HTML: every line escaped, lines joined by `<br>`
fn text_to_html(value: &str) -> String {
    value
        .lines()
        .map(ammonia::clean_text)
        .collect::<Vec<_>>()
        .join("<br>")
}

/// Server-side check of the request: field rules plus type, size and count
/// of every referenced attachment
pub fn check_request(
    request: &SendFeedbackRequest,
    attachments: &[StoredAttachment],
    settings: &FeedbackSettings,
) -> Result<(), WorkflowError> {
    let draft = FeedbackDraft {
        subject: Some(request.subject),
        description: request.description.clone(),
        contact_email: request.sender_email.clone().unwrap_or_default(),
    };
    validate(&draft, settings)?;

    let restrictions = settings.upload_restrictions();
    for (idx, file) in attachments.iter().enumerate() {
        restrictions.check(&file.file_name, file.file_size, idx)?;
    }
    Ok(())
}

/// Builds the message: "Feedback: {subject}" with the details and a link
/// per attachment
pub fn compose(
    request: &SendFeedbackRequest,
    attachments: &[StoredAttachment],
    sender: String,
    recipients: Vec<String>,
    public_base_url: &str,
) -> FeedbackEmail {
    let subject_label = request.subject.label();
    let base = public_base_url.trim_end_matches('/');

    let mut html = format!(
        "<h3>Feedback Details</h3>\n<p><strong>Company:</strong> {}</p>\n<p><strong>Subject:</strong> {}</p>\n<p><strong>Description:</strong></p>\n<p>{}</p>\n",
        ammonia::clean_text(&request.company),
        ammonia::clean_text(subject_label),
        text_to_html(&request.description),
    );
    let mut text = format!(
        "Feedback Details\n\nCompany: {}\nSubject: {}\n\nDescription:\n{}\n",
        request.company, subject_label, request.description
    );

    if !attachments.is_empty() {
        html.push_str("<h4>Attachments:</h4><ul>");
        text.push_str("\nAttachments:\n");
        for file in attachments {
            let link = format!("{}{}", base, file.url);
            html.push_str(&format!(
                "<li><a href='{}'>{}</a></li>",
                ammonia::clean_text(&link),
                ammonia::clean_text(&file.file_name)
            ));
            text.push_str(&format!("- {} ({})\n", file.file_name, link));
        }
        html.push_str("</ul>");
    }

    FeedbackEmail {
        sender,
        recipients,
        subject: format!("Feedback: {}", subject_label),
        html_body: html,
        text_body: text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::errors::ValidationError;
    use contracts::usecases::u501_feedback::{FeedbackSubject, UploadRejection};

    fn settings() -> FeedbackSettings {
        FeedbackSettings {
            max_files: 2,
            max_file_size_mb: 1.0,
            allowed_file_types: [".pdf", ".png"].into_iter().map(String::from).collect(),
            max_description_length: 500,
            contact_url: "https://example.com/contact".into(),
            default_sender_email: None,
        }
    }

    fn request() -> SendFeedbackRequest {
        SendFeedbackRequest {
            sender_email: None,
            company: "ACME KSA".into(),
            subject: FeedbackSubject::BugReport,
            description: "QR <missing>".into(),
            attachments: vec!["/files/ab-scan.png".into()],
        }
    }

    fn stored(name: &str, size: u64) -> StoredAttachment {
        StoredAttachment {
            url: format!("/files/ab-{}", name),
            file_name: name.into(),
            file_size: size,
        }
    }

    #[test]
    fn test_sender_fallback_order() {
        assert_eq!(
            resolve_sender(Some("user@acme.sa"), Some("default@acme.sa"), "smtp@acme.sa"),
            Some("user@acme.sa".into())
        );
        assert_eq!(
            resolve_sender(Some("  "), Some("default@acme.sa"), "smtp@acme.sa"),
            Some("default@acme.sa".into())
        );
        assert_eq!(
            resolve_sender(None, None, "smtp@acme.sa"),
            Some("smtp@acme.sa".into())
        );
        assert_eq!(resolve_sender(None, Some(""), ""), None);
    }

    #[test]
    fn test_compose_subject_and_links() {
        let email = compose(
            &request(),
            &[stored("scan.png", 10)],
            "smtp@acme.sa".into(),
            vec!["support@example.com".into()],
            "http://localhost:3000/",
        );
        assert_eq!(email.subject, "Feedback: Bug Report");
        assert!(email.html_body.contains("&lt;missing&gt;"));
        assert!(!email.html_body.contains("<missing>"));
        assert!(email.html_body.contains("ab-scan.png'>scan.png</a>"));
        assert!(email.text_body.contains("- scan.png (http://localhost:3000/files/ab-scan.png)"));
    }

    #[test]
    fn test_description_lines_and_markup_are_escaped() {
        let mut req = request();
        req.description = "line one\n<script>alert(1)</script>".into();
        let email = compose(&req, &[], "a@b.sa".into(), vec![], "");
        assert!(!email.html_body.contains("<script>"));
        assert!(email.html_body.contains("<br>&lt;script&gt;"));
        assert!(email.text_body.contains("<script>alert(1)</script>"));
    }

    #[test]
    fn test_compose_without_attachments() {
        let email = compose(&request(), &[], "a@b.sa".into(), vec![], "");
        assert!(!email.html_body.contains("Attachments"));
    }

    #[test]
    fn test_check_request_rejects_bad_attachments() {
        let cfg = settings();
        assert!(check_request(&request(), &[stored("scan.png", 10)], &cfg).is_ok());

        let err = check_request(&request(), &[stored("run.exe", 10)], &cfg).unwrap_err();
        assert_eq!(err.to_string(), "Invalid file type: .exe (run.exe)");

        let err = check_request(&request(), &[stored("big.pdf", 2 * 1024 * 1024)], &cfg)
            .unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::UploadRejected(UploadRejection::FileSize { .. })
        ));

        let three = [stored("a.pdf", 1), stored("b.pdf", 1), stored("c.pdf", 1)];
        let err = check_request(&request(), &three, &cfg).unwrap_err();
        assert_eq!(
            err,
            WorkflowError::UploadRejected(UploadRejection::TooManyFiles { max: 2 })
        );
    }

    #[test]
    fn test_check_request_validates_fields() {
        let mut req = request();
        req.description = "x".repeat(501);
        assert!(matches!(
            check_request(&req, &[], &settings()),
            Err(WorkflowError::Validation(ValidationError::DescriptionTooLong { .. }))
        ));
    }
}
