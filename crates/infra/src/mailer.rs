//! Outbound mail seam.
//!
//! Actual delivery is an external collaborator; callers treat every send as
//! fire-and-forget and must never fail a request on a mail error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("mail relay rejected message: {0}")]
    Relay(String),
}

#[derive(Debug, Clone)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

pub trait Mailer: Send + Sync {
    fn send(&self, msg: MailMessage) -> Result<(), MailError>;
}

/// Mailer that records deliveries in the log instead of relaying.
///
/// Stands in wherever no relay is configured (dev, tests); the sender
/// address comes from the mail credentials in the environment.
#[derive(Debug, Clone)]
pub struct LogMailer {
    pub from: String,
}

impl LogMailer {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

impl Mailer for LogMailer {
    fn send(&self, msg: MailMessage) -> Result<(), MailError> {
        tracing::info!(
            from = %self.from,
            to = %msg.to,
            subject = %msg.subject,
            "mail delivery (log only)"
        );
        Ok(())
    }
}
