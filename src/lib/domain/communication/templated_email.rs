//! Templated email composition
//!
//! An [`EmailBuilder`] collects one message at a time through chained calls,
//! renders it from a template file and dispatches it through the transport
//! picked by [`TransportSelector`]. Whatever the outcome of `send`, the
//! builder is left empty and ready for the next message.
//!
//! The debug sink and the storage provisioner are injected, see
//! `infrastructure::templated_email::email_builder` for the filesystem wiring.
//!
//! ```ignore
//! let transport = TransportSelector::new(config.debug, debug_sink, mailer);
//! let mut email = EmailBuilder::new(&config, host, renderer, transport, &provisioner)?;
//!
//! email
//!     .compose_from("welcome", parameters)?
//!     .add_to("user@example.com", Some("User"))
//!     .set_subject("Welcome!")
//!     .send()?;
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

mod builder;
mod pending;
mod transport;

pub use builder::EmailBuilder;
pub use pending::PendingMessage;
pub use transport::{TransportChoice, TransportSelector};

/// Name of the parameter that always carries the request host
pub const DOMAIN_PARAMETER: &str = "domain";

/// The request an email is being composed for
pub trait RequestContext: Send + Sync + 'static {
    /// The host the current request was addressed to
    fn host(&self) -> String;
}

impl RequestContext for String {
    fn host(&self) -> String {
        self.clone()
    }
}

/// How Cc and Bcc recipients are handed to the transport
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum CopyRecipients {
    /// Keep Cc and Bcc as separate recipient kinds
    #[default]
    Distinct,

    /// Append Cc and Bcc recipients to the primary recipients
    Folded,
}

/// Templated email configuration
#[derive(Clone, Debug, PartialEq, Eq, Parser)]
pub struct TemplatedEmailConfig {
    /// Write emails to the debug storage instead of sending them
    #[clap(long = "email-debug", env = "EMAIL_DEBUG")]
    pub debug: bool,

    /// Directory receiving emails in debug mode
    #[clap(long, env = "EMAIL_DEBUG_STORAGE", default_value = "temp/sent-emails")]
    pub debug_storage: PathBuf,

    /// Directory holding one template file per email kind
    #[clap(long, env = "EMAIL_TEMPLATE_STORAGE", default_value = "templates/emails")]
    pub template_storage: PathBuf,

    /// Extension of the template files
    #[clap(long, env = "EMAIL_TEMPLATE_EXTENSION", default_value = "html")]
    pub template_extension: String,

    /// Sender display name used when none is given
    #[clap(long, env = "EMAIL_FROM_NAME", default_value = "Templated email")]
    pub from_name: String,

    /// Sender address used when none is given
    #[clap(long, env = "EMAIL_FROM_ADDRESS", default_value = "templated.email@example.com")]
    pub from_email: String,

    /// Whether Cc and Bcc stay distinct or are folded into To
    #[clap(long, env = "EMAIL_COPY_RECIPIENTS", value_enum, default_value_t = CopyRecipients::Distinct)]
    pub copy_recipients: CopyRecipients,
}

impl TemplatedEmailConfig {
    /// Creates a production configuration with the default sender identity
    pub fn new(debug_storage: impl Into<PathBuf>, template_storage: impl Into<PathBuf>) -> Self {
        Self {
            debug: false,
            debug_storage: debug_storage.into(),
            template_storage: template_storage.into(),
            template_extension: "html".to_string(),
            from_name: "Templated email".to_string(),
            from_email: "templated.email@example.com".to_string(),
            copy_recipients: CopyRecipients::Distinct,
        }
    }
}
