use std::sync::Arc;

use contracts::shared::api::RemoteEnvelope;
use contracts::usecases::u501_feedback::{FeedbackSettings, SendFeedbackRequest};

use once_cell::sync::OnceCell;

use super::composer::{check_request, compose, resolve_sender, StoredAttachment};
use super::mailer::{FeedbackMailer, SmtpMailer};
use crate::shared::config::{get_config, Config};
use crate::shared::files::repository as files;

static EXECUTOR: OnceCell<FeedbackExecutor> = OnceCell::new();

/// Process-wide executor built from the loaded configuration
pub fn shared() -> anyhow::Result<&'static FeedbackExecutor> {
    EXECUTOR.get_or_try_init(|| get_config().map(FeedbackExecutor::from_config))
}

/// Executor of the feedback use case
#[derive(Clone)]
pub struct FeedbackExecutor {
    mailer: Arc<dyn FeedbackMailer>,
    settings: FeedbackSettings,
    recipients: Vec<String>,
    smtp_from: String,
    public_base_url: String,
}

impl FeedbackExecutor {
    pub fn new(
        mailer: Arc<dyn FeedbackMailer>,
        settings: FeedbackSettings,
        recipients: Vec<String>,
        smtp_from: String,
        public_base_url: String,
    ) -> Self {
        Self {
            mailer,
            settings,
            recipients,
            smtp_from,
            public_base_url,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(SmtpMailer::new(&config.smtp)),
            config.feedback.to_settings(),
            config.feedback.recipient_emails.clone(),
            config.smtp.from.clone(),
            config.server.public_base_url(),
        )
    }

    pub fn settings(&self) -> &FeedbackSettings {
        &self.settings
    }

    /// Sends the feedback and folds any failure into a `success=false`
    /// envelope carrying the error text
    pub async fn send(&self, request: SendFeedbackRequest) -> RemoteEnvelope {
        match self.try_send(request).await {
            Ok(()) => RemoteEnvelope::ok("Feedback email sent successfully"),
            Err(e) => {
                tracing::error!("Feedback email error: {:#}", e);
                RemoteEnvelope::failed(e.to_string())
            }
        }
    }

    async fn try_send(&self, request: SendFeedbackRequest) -> anyhow::Result<()> {
        let mut attachments = Vec::with_capacity(request.attachments.len());
        for url in &request.attachments {
            let file = files::get_by_url(url)
                .await?
                .ok_or_else(|| anyhow::anyhow!("File not found: {}", url))?;
            attachments.push(StoredAttachment {
                url: file.file_url,
                file_name: file.file_name,
                file_size: file.file_size.max(0) as u64,
            });
        }
        self.deliver(&request, &attachments).await
    }

    /// Validation, sender resolution, composition and delivery of a request
    /// whose attachments are already resolved
    pub async fn deliver(
        &self,
        request: &SendFeedbackRequest,
        attachments: &[StoredAttachment],
    ) -> anyhow::Result<()> {
        check_request(request, attachments, &self.settings)?;

        if self.recipients.is_empty() {
            anyhow::bail!("No feedback recipients are configured");
        }
        let sender = resolve_sender(
            request.sender_email.as_deref(),
            self.settings.default_sender_email.as_deref(),
            &self.smtp_from,
        )
        .ok_or_else(|| anyhow::anyhow!("No outgoing email account is configured"))?;

        tracing::info!(
            "Sending feedback '{}' from {} for company {} with {} attachment(s)",
            request.subject.label(),
            sender,
            request.company,
            attachments.len()
        );
        let email = compose(
            request,
            attachments,
            sender,
            self.recipients.clone(),
            &self.public_base_url,
        );
        self.mailer.send(email).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::u501_feedback::composer::FeedbackEmail;
    use async_trait::async_trait;
    use contracts::usecases::u501_feedback::FeedbackSubject;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<FeedbackEmail>>,
        fail_with: Option<String>,
    }

    #[async_trait]
    impl FeedbackMailer for RecordingMailer {
        async fn send(&self, email: FeedbackEmail) -> anyhow::Result<()> {
            if let Some(message) = &self.fail_with {
                anyhow::bail!("{}", message);
            }
            self.sent.lock().unwrap().push(email);
            Ok(())
        }
    }

    fn settings(default_sender: Option<&str>) -> FeedbackSettings {
        FeedbackSettings {
            max_files: 3,
            max_file_size_mb: 5.0,
            allowed_file_types: [".pdf"].into_iter().map(String::from).collect(),
            max_description_length: 500,
            contact_url: "https://example.com/contact".into(),
            default_sender_email: default_sender.map(String::from),
        }
    }

    fn request(sender: Option<&str>) -> SendFeedbackRequest {
        SendFeedbackRequest {
            sender_email: sender.map(String::from),
            company: "ACME KSA".into(),
            subject: FeedbackSubject::FeatureRequest,
            description: "Batch resend button".into(),
            attachments: vec![],
        }
    }

    fn executor(mailer: Arc<RecordingMailer>, default_sender: Option<&str>) -> FeedbackExecutor {
        FeedbackExecutor::new(
            mailer,
            settings(default_sender),
            vec!["support@example.com".into()],
            "smtp@acme.sa".into(),
            "http://localhost:3000".into(),
        )
    }

    #[tokio::test]
    async fn test_default_account_used_without_explicit_sender() {
        let mailer = Arc::new(RecordingMailer::default());
        let exec = executor(mailer.clone(), Some("erp@acme.sa"));
        exec.deliver(&request(None), &[]).await.unwrap();
        exec.deliver(&request(Some("cfo@acme.sa")), &[]).await.unwrap();

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent[0].sender, "erp@acme.sa");
        assert_eq!(sent[1].sender, "cfo@acme.sa");
        assert_eq!(sent[0].subject, "Feedback: Feature Request");
    }

    #[tokio::test]
    async fn test_smtp_from_is_last_fallback() {
        let mailer = Arc::new(RecordingMailer::default());
        let exec = executor(mailer.clone(), None);
        exec.deliver(&request(None), &[]).await.unwrap();
        assert_eq!(mailer.sent.lock().unwrap()[0].sender, "smtp@acme.sa");
    }

    #[tokio::test]
    async fn test_invalid_attachment_is_not_sent() {
        let mailer = Arc::new(RecordingMailer::default());
        let exec = executor(mailer.clone(), None);
        let file = StoredAttachment {
            url: "/files/x-notes.txt".into(),
            file_name: "notes.txt".into(),
            file_size: 10,
        };
        assert!(exec.deliver(&request(None), &[file]).await.is_err());
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mailer_failure_propagates() {
        let mailer = Arc::new(RecordingMailer {
            fail_with: Some("quota exceeded".into()),
            ..Default::default()
        });
        let exec = executor(mailer, None);
        let err = exec.deliver(&request(None), &[]).await.unwrap_err();
        assert_eq!(err.to_string(), "quota exceeded");
    }
}
