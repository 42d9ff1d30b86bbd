//! Mail transports

pub mod filesystem;
mod inline;
pub mod smtp;
