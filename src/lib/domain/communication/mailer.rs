//! Email service module

#[cfg(test)]
use mockall::mock;

mod errors;
mod message;

pub use errors::MailerError;
pub use message::RenderedMessage;

/// A transport that delivers (or persists) a rendered message
///
/// Implementations perform blocking I/O. Any timeout or retry policy belongs
/// to the implementation, callers see a single success or failure.
pub trait Mailer: Send + Sync + 'static {
    /// Send an email
    ///
    /// # Arguments
    /// * `message` - The [`RenderedMessage`] to deliver.
    ///
    /// # Returns
    /// A [`Result`] indicating success or failure.
    fn send(&self, message: &RenderedMessage) -> Result<(), MailerError>;
}

#[cfg(test)]
mock! {
    pub Mailer {}

    impl Mailer for Mailer {
        fn send(&self, message: &RenderedMessage) -> Result<(), MailerError>;
    }
}
