//! Email formatting and SMTP delivery.

use async_trait::async_trait;
use dealwatch_core::Deal;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build email message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP transport failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// A fully formatted notification email, ready for any transport.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

/// Transport seam for sending the notification email.
///
/// `SmtpMailer` is the production implementation; tests substitute a
/// recording double.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError>;
}

/// Mailer backed by an authenticated SMTP-over-TLS session.
#[derive(Debug)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpMailer {
    pub fn new(
        host: &str,
        port: u16,
        username: &str,
        password: &str,
        from: &str,
        to: &str,
    ) -> Result<Self, EmailError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(host)?
            .port(port)
            .credentials(Credentials::new(username.to_string(), password.to_string()))
            .build();

        Ok(Self {
            transport,
            from: from.parse()?,
            to: to.parse()?,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(email.subject.clone())
            .multipart(MultiPart::alternative_plain_html(
                email.text_body.clone(),
                email.html_body.clone(),
            ))?;

        self.transport.send(message).await?;
        Ok(())
    }
}

/// Subject line for a batch of new matches.
fn subject_line(count: usize) -> String {
    format!("Deal alert: {} new matching deal(s) on Woot!", count)
}

/// Price line for one deal: sale price plus savings when the list price
/// is higher, or "Price unknown" when the offer carries no items.
fn format_price_line(deal: &Deal) -> String {
    match deal.sale_price() {
        Some(price) => match deal.savings() {
            Some(savings) => format!("${:.2} (Save ${:.2})", price, savings),
            None => format!("${:.2}", price),
        },
        None => "Price unknown".to_string(),
    }
}

/// HTML block for one deal.
fn format_deal_html(deal: &Deal) -> String {
    format!(
        "<h2>{}</h2>\n\
         <p><strong>Price:</strong> {}</p>\n\
         <p>{}</p>\n\
         <p><a href=\"{}\">View on Woot!</a></p>\n\
         <hr>\n",
        deal.title,
        format_price_line(deal),
        deal.short_description(),
        deal.url,
    )
}

/// Plain-text line for one deal.
fn format_deal_text(deal: &Deal) -> String {
    format!("{} - {}", deal.title, deal.url)
}

/// Build the single summary email for a non-empty batch of new deals.
pub fn build_email(deals: &[Deal]) -> OutgoingEmail {
    let text_body = deals
        .iter()
        .map(format_deal_text)
        .collect::<Vec<_>>()
        .join("\n\n");

    let now = chrono::Utc::now();
    let html_body = format!(
        "<html><body>{}<p><small>Sent by dealwatch at {}</small></p></body></html>",
        deals.iter().map(format_deal_html).collect::<String>(),
        now.format("%Y-%m-%d %H:%M:%S UTC"),
    );

    OutgoingEmail {
        subject: subject_line(deals.len()),
        text_body,
        html_body,
    }
}
