//! `assetdesk-infra` — adapters for external collaborators.
//!
//! The document store and the mail relay are collaborators, not part of the
//! design: this crate exposes each behind a narrow trait so services take
//! handles by injection and tests swap in fakes.

pub mod collection;
pub mod mailer;

pub use collection::{Collection, InMemoryCollection};
pub use mailer::{LogMailer, MailError, MailMessage, Mailer};
