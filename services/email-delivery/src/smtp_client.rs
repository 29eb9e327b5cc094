//! SMTP Client
//!
//! Sends generated emails via SMTP using lettre.

use anyhow::{Context, Result};
use lettre::message::{header::ContentType, Mailbox, MultiPart, SinglePart};
use lettre::{
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use mailgen_utils::SmtpConfig;

pub struct SmtpClient {
    config: SmtpConfig,
}

impl SmtpClient {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    /// True when SMTP credentials are configured; without them delivery is
    /// recorded but not attempted.
    pub fn is_configured(&self) -> bool {
        !self.config.username.is_empty() && !self.config.password.is_empty()
    }

    #[allow(dead_code)]
    pub fn from_name(&self) -> &str {
        &self.config.from_name
    }

    /// Send a multipart (text + HTML) email.
    pub async fn send(
        &self,
        to_email: &str,
        to_name: &str,
        subject: &str,
        body_html: &str,
        body_text: &str,
    ) -> Result<String> {
        let from_mailbox: Mailbox =
            format!("{} <{}>", self.config.from_name, self.config.from_address)
                .parse()
                .context("Invalid from address")?;

        let to_mailbox: Mailbox = format!("{} <{}>", to_name, to_email)
            .parse()
            .context("Invalid to address")?;

        let email = Message::builder()
            .from(from_mailbox)
            .to(to_mailbox)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(body_text.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(body_html.to_string()),
                    ),
            )
            .context("Failed to build email")?;

        let creds = Credentials::new(self.config.username.clone(), self.config.password.clone());

        let mailer: AsyncSmtpTransport<Tokio1Executor> =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)
                .context("Failed to create SMTP transport")?
                .port(self.config.port)
                .credentials(creds)
                .build();

        let response = mailer.send(email).await.context("Failed to send email")?;

        Ok(response.message().collect::<Vec<_>>().join("\n"))
    }
}

impl Default for SmtpClient {
    fn default() -> Self {
        Self::new(SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            username: String::new(),
            password: String::new(),
            from_address: "outreach@mailgen.io".to_string(),
            from_name: "MailGen Outreach".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_client_is_detected() {
        let client = SmtpClient::default();
        assert!(!client.is_configured());
    }
}
