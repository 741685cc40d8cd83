//! SMTP delivery of status messages
//!
//! Messages are plain text, sent from the configured user to every
//! configured recipient over STARTTLS with certificate verification.

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::info;

use crate::config::EmailSettings;
use crate::error::ReportResult;

/// A composed notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: String,
    pub body: String,
}

/// Build the message for `notification` from the email settings
pub fn build_message(settings: &EmailSettings, notification: &Notification) -> ReportResult<Message> {
    let from: Mailbox = settings.validate()?.parse()?;
    let mut builder = Message::builder()
        .from(from)
        .subject(notification.subject.as_str())
        .header(ContentType::TEXT_PLAIN);
    for recipient in &settings.recipients {
        builder = builder.to(recipient.parse()?);
    }
    Ok(builder.body(notification.body.clone())?)
}

/// Send `notification`, logging in with the configured user and `password`
pub fn send(
    settings: &EmailSettings,
    password: &str,
    notification: &Notification,
) -> ReportResult<()> {
    let message = build_message(settings, notification)?;
    let username = settings.validate()?.to_string();

    let mailer = SmtpTransport::starttls_relay(&settings.smtp_server)?
        .port(settings.smtp_port)
        .credentials(Credentials::new(username, password.to_string()))
        .build();
    mailer.send(&message)?;

    info!(
        server = %settings.smtp_server,
        recipients = settings.recipients.len(),
        subject = %notification.subject,
        "notification sent"
    );
    Ok(())
}
