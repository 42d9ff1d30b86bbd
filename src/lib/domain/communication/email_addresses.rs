//! Email addresses module.

mod email_address;

pub use email_address::{qualify_address, EmailAddress};
