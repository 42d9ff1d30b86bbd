//! Filesystem, SMTP and template engine adapters

pub mod email;
pub mod storage;
pub mod templated_email;
pub mod templates;
