//! Outgoing email notifications over SMTP.
//!
//! Every notification in the system is best-effort: callers either spawn
//! the send onto a background task or ignore the result. A failed send is
//! logged and never propagated into the operation that triggered it.

use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::core::config::SmtpConfig;

/// SMTP mailer. When constructed without configuration it is disabled:
/// sends are logged at debug level and skipped.
pub struct Mailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from_address: String,
}

impl Mailer {
    /// Build a mailer from optional SMTP configuration.
    pub fn new(config: Option<SmtpConfig>) -> anyhow::Result<Self> {
        let Some(config) = config else {
            tracing::info!("SMTP not configured, email notifications disabled");
            return Ok(Self {
                transport: None,
                from_address: String::new(),
            });
        };

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| anyhow::anyhow!("Invalid SMTP relay '{}': {}", config.host, e))?
            .port(config.port);

        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        tracing::info!("SMTP mailer configured for relay {}", config.host);

        Ok(Self {
            transport: Some(builder.build()),
            from_address: config.from_address,
        })
    }

    /// Send a plain-text email. Errors are returned so the caller can log
    /// them, but no caller treats them as fatal.
    pub async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        let Some(transport) = &self.transport else {
            tracing::debug!(to, subject, "Mailer disabled, skipping notification");
            return Ok(());
        };

        let email = Message::builder()
            .from(self.from_address.parse()?)
            .to(to.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;

        transport.send(email).await?;

        tracing::info!(to, subject, "Notification email sent");
        Ok(())
    }

    /// Fire-and-forget variant used after report mutations: failures are
    /// logged here and never surface to the triggering operation.
    pub async fn send_best_effort(&self, to: &str, subject: &str, body: &str) {
        if let Err(e) = self.send(to, subject, body).await {
            tracing::warn!(to, subject, error = %e, "Failed to send notification email");
        }
    }
}
