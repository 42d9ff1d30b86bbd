//! Outbound email composition

pub mod email_addresses;
pub mod errors;
pub mod mailer;
pub mod storage;
pub mod templated_email;
pub mod templates;
