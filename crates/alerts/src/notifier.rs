//! Deal notification logic.

use crate::email::{build_email, EmailError, Mailer};
use dealwatch_core::Deal;
use tracing::{debug, info};

/// Sends one summary email per run for the newly matched deals.
pub struct Notifier<M: Mailer> {
    mailer: M,
}

impl<M: Mailer> Notifier<M> {
    pub fn new(mailer: M) -> Self {
        Self { mailer }
    }

    /// Send a notification covering the given deals.
    ///
    /// An empty batch is a no-op; otherwise exactly one email goes out.
    /// Returns the number of deals notified.
    pub async fn notify(&self, deals: &[Deal]) -> Result<usize, EmailError> {
        if deals.is_empty() {
            debug!("No new matching deals, skipping notification");
            return Ok(0);
        }

        let email = build_email(deals);
        self.mailer.send(&email).await?;

        info!(count = deals.len(), "Sent deal notification email");
        Ok(deals.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::email::OutgoingEmail;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    /// Records outgoing emails instead of talking to an SMTP server.
    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<OutgoingEmail>>,
    }

    #[async_trait]
    impl Mailer for &RecordingMailer {
        async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError> {
            self.sent.lock().unwrap().push(email.clone());
            Ok(())
        }
    }

    fn deal(id: &str, title: &str) -> Deal {
        Deal {
            id: id.to_string(),
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_empty_batch_sends_nothing() {
        let mailer = RecordingMailer::default();
        let notifier = Notifier::new(&mailer);

        let notified = notifier.notify(&[]).await.unwrap();
        assert_eq!(notified, 0);
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_batch_sends_exactly_one_email() {
        let mailer = RecordingMailer::default();
        let notifier = Notifier::new(&mailer);

        let deals = vec![deal("A2", "Kindle Paperwhite"), deal("A3", "Kobo Clara")];
        let notified = notifier.notify(&deals).await.unwrap();
        assert_eq!(notified, 2);

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].text_body.contains("Kindle Paperwhite"));
        assert!(sent[0].text_body.contains("Kobo Clara"));
    }
}
