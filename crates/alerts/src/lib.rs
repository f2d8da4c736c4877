//! Notification side of the dealwatch service.
//!
//! This crate provides:
//! - durable storage for the set of already-notified deal ids
//! - SMTP email delivery and message formatting
//! - the notifier that turns new matches into one summary email

pub mod email;
pub mod notifier;
pub mod store;

pub use email::{build_email, EmailError, Mailer, OutgoingEmail, SmtpMailer};
pub use notifier::Notifier;
pub use store::{SeenStore, StoreError};
