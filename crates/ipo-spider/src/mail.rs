use crate::config::Config;
use crate::error::{Result, SpiderError};
use crate::report::Report;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, error, info};

/// Delivers a composed [`Report`].
#[allow(async_fn_in_trait)]
pub trait Dispatcher {
    async fn dispatch(&self, report: &Report) -> Result<()>;
}

/// Build the multipart/alternative message (plain text first, HTML preferred) for `report`.
pub fn build_message(report: &Report) -> Result<Message> {
    let message = Message::builder()
        .from(mailbox(&report.sender)?)
        .to(mailbox(&report.recipient)?)
        .subject(&report.subject)
        .multipart(MultiPart::alternative_plain_html(
            report.plain.clone(),
            report.html.clone(),
        ))?;

    Ok(message)
}

fn mailbox(address: &str) -> Result<Mailbox> {
    address.parse().map_err(|source| SpiderError::Address {
        address: address.to_string(),
        source,
    })
}

/// Sends reports through an SMTP submission server over implicit TLS, logging in with the
/// sender's address and app password.
///
/// Each dispatch opens its own connection and closes it before returning.
pub struct SmtpDispatcher {
    host: String,
    port: u16,
    credentials: Credentials,
}

impl SmtpDispatcher {
    pub fn new(config: &Config) -> Self {
        Self {
            host: config.smtp_host.clone(),
            port: config.smtp_port,
            credentials: Credentials::new(config.sender.clone(), config.app_password.clone()),
        }
    }

    fn transmission_error(&self, source: lettre::transport::smtp::Error) -> SpiderError {
        error!("failed to send email via {}:{}, error({source})", self.host, self.port);
        SpiderError::Transmission {
            host: format!("{}:{}", self.host, self.port),
            source,
        }
    }
}

impl Dispatcher for SmtpDispatcher {
    async fn dispatch(&self, report: &Report) -> Result<()> {
        let message = build_message(report)?;

        debug!("connecting to {}:{}", self.host, self.port);
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.host)
            .map_err(|err| self.transmission_error(err))?
            .port(self.port)
            .credentials(self.credentials.clone())
            .build();

        transport
            .send(message)
            .await
            .map_err(|err| self.transmission_error(err))?;

        info!("email sent successfully to {}", report.recipient);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn report(sender: &str, recipient: &str) -> Report {
        Report {
            subject: "Upcoming IPOs – Week of August 04, 2025".to_string(),
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            generated_at: chrono_tz::UTC.with_ymd_and_hms(2025, 8, 4, 0, 0, 0).unwrap(),
            records: Vec::new(),
            plain: "plain body".to_string(),
            html: "<p>html body</p>".to_string(),
        }
    }

    #[test]
    fn message_is_multipart_alternative() {
        let message = build_message(&report("sender@gmail.com", "inbox@example.com")).unwrap();
        let formatted = String::from_utf8(message.formatted()).unwrap();

        assert!(formatted.contains("multipart/alternative"));
        assert!(formatted.contains("text/plain"));
        assert!(formatted.contains("text/html"));
        assert!(formatted.contains("plain body"));
        assert!(formatted.contains("<p>html body</p>"));

        let envelope = message.envelope();
        assert_eq!(envelope.from().unwrap().to_string(), "sender@gmail.com");
        assert_eq!(envelope.to().len(), 1);
        assert_eq!(envelope.to()[0].to_string(), "inbox@example.com");
    }

    #[test]
    fn bad_recipient_is_an_address_error() {
        let err = build_message(&report("sender@gmail.com", "not an address")).unwrap_err();
        assert!(matches!(err, SpiderError::Address { address, .. } if address == "not an address"));
    }
}
