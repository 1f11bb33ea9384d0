use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::composer::FeedbackEmail;
use crate::shared::config::SmtpConfig;

/// Delivery of composed feedback messages
#[async_trait]
pub trait FeedbackMailer: Send + Sync {
    async fn send(&self, email: FeedbackEmail) -> anyhow::Result<()>;
}

/// SMTP delivery through the configured relay.
///
/// The transport is built once; a broken SMTP section is reported on every
/// send instead of at startup.
pub struct SmtpMailer {
    transport: Result<AsyncSmtpTransport<Tokio1Executor>, String>,
}

impl SmtpMailer {
    pub fn new(smtp: &SmtpConfig) -> Self {
        let transport = build_transport(smtp).map_err(|e| e.to_string());
        match &transport {
            Ok(_) => tracing::info!(
                host = %smtp.host,
                port = smtp.port,
                starttls = smtp.starttls,
                "SMTP mailer initialized"
            ),
            Err(e) => tracing::warn!("Feedback emails cannot be sent: {}", e),
        }
        Self { transport }
    }
}

fn build_transport(smtp: &SmtpConfig) -> anyhow::Result<AsyncSmtpTransport<Tokio1Executor>> {
    let host = smtp.host.trim();
    if host.is_empty() {
        anyhow::bail!("SMTP is not configured: missing host");
    }

    let mut builder = if smtp.starttls {
        AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|e| anyhow::anyhow!("Invalid SMTP host: {}", e))?
            .port(smtp.port)
    } else {
        AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host).port(smtp.port)
    };

    if !smtp.username.trim().is_empty() {
        builder = builder.credentials(Credentials::new(
            smtp.username.clone(),
            smtp.password.clone(),
        ));
    }
    Ok(builder.build())
}

/// Converts a composed feedback message into a MIME message
pub fn to_message(email: &FeedbackEmail) -> anyhow::Result<Message> {
    let from: Mailbox = email
        .sender
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid sender address '{}': {}", email.sender, e))?;

    let mut builder = Message::builder().from(from).subject(email.subject.clone());
    let mut has_recipient = false;
    for recipient in &email.recipients {
        match recipient.parse::<Mailbox>() {
            Ok(mailbox) => {
                builder = builder.to(mailbox);
                has_recipient = true;
            }
            Err(e) => tracing::warn!("Skipping invalid recipient '{}': {}", recipient, e),
        }
    }
    if !has_recipient {
        anyhow::bail!("No valid feedback recipients are configured");
    }

    builder
        .multipart(
            MultiPart::alternative()
                .singlepart(SinglePart::plain(email.text_body.clone()))
                .singlepart(SinglePart::html(email.html_body.clone())),
        )
        .map_err(|e| anyhow::anyhow!("Failed to build email: {}", e))
}

#[async_trait]
impl FeedbackMailer for SmtpMailer {
    async fn send(&self, email: FeedbackEmail) -> anyhow::Result<()> {
        let transport = self.transport.as_ref().map_err(|e| anyhow::anyhow!("{}", e))?;
        let message = to_message(&email)?;

        transport
            .send(message)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to send email: {}", e))?;

        tracing::info!(
            "Feedback email '{}' sent to {} recipient(s)",
            email.subject,
            email.recipients.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(recipients: Vec<&str>) -> FeedbackEmail {
        FeedbackEmail {
            sender: "noreply@acme.sa".into(),
            recipients: recipients.into_iter().map(String::from).collect(),
            subject: "Feedback: Other".into(),
            html_body: "<p>hi</p>".into(),
            text_body: "hi".into(),
        }
    }

    #[test]
    fn test_message_requires_valid_recipient() {
        assert!(to_message(&email(vec!["support@example.com"])).is_ok());
        assert!(to_message(&email(vec!["not an address"])).is_err());
        assert!(to_message(&email(vec![])).is_err());
    }

    #[test]
    fn test_message_rejects_bad_sender() {
        let mut mail = email(vec!["support@example.com"]);
        mail.sender = "broken".into();
        let err = to_message(&mail).unwrap_err();
        assert!(err.to_string().starts_with("Invalid sender address 'broken'"));
    }

    #[tokio::test]
    async fn test_missing_host_is_reported_on_send() {
        let mailer = SmtpMailer::new(&SmtpConfig::default());
        let err = mailer.send(email(vec!["support@example.com"])).await.unwrap_err();
        assert_eq!(err.to_string(), "SMTP is not configured: missing host");
    }

    #[tokio::test]
    async fn test_transport_is_built_once_for_a_configured_host() {
        let smtp = SmtpConfig {
            host: "smtp.example.com".into(),
            from: "noreply@example.com".into(),
            ..SmtpConfig::default()
        };
        let mailer = SmtpMailer::new(&smtp);
        assert!(mailer.transport.is_ok());
    }
}
