//! Mailer errors

use std::{io, path::PathBuf};

use thiserror::Error;

/// Mailer errors
#[derive(Debug, Error)]
pub enum MailerError {
    /// An address could not be understood by the transport
    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    /// An attachment or inline asset could not be read
    #[error("could not read attachment {}", path.display())]
    Attachment {
        /// The offending file
        path: PathBuf,

        /// The underlying read failure
        #[source]
        source: io::Error,
    },

    /// Writing the message failed
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

impl From<lettre::address::AddressError> for MailerError {
    fn from(err: lettre::address::AddressError) -> Self {
        MailerError::InvalidAddress(err.to_string())
    }
}

impl From<lettre::error::Error> for MailerError {
    fn from(err: lettre::error::Error) -> Self {
        MailerError::UnknownError(err.into())
    }
}
