//! Core traits defined in `namesmith-core` and implemented by other crates.

pub mod mailer;
pub mod password;

pub use mailer::{MailMessage, Mailer};
pub use password::PasswordDigester;
