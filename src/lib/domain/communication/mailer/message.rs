//! Email message

use std::path::PathBuf;

use crate::domain::communication::email_addresses::EmailAddress;

/// A fully rendered, transport-agnostic email message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedMessage {
    /// The sender of the email
    pub from: EmailAddress,

    /// Primary recipients, in insertion order
    pub to: Vec<EmailAddress>,

    /// Carbon copy recipients
    pub cc: Vec<EmailAddress>,

    /// Blind carbon copy recipients
    pub bcc: Vec<EmailAddress>,

    /// The subject of the email, left to the transport default when absent
    pub subject: Option<String>,

    /// Where replies should go
    pub reply_to: Option<EmailAddress>,

    /// Files to attach, in order
    pub attachments: Vec<PathBuf>,

    /// The HTML body of the email
    pub html_body: String,

    /// Directory that relative asset references in the body resolve against
    pub base_path: Option<PathBuf>,
}

impl RenderedMessage {
    /// Creates an empty message from `from`
    pub fn new(from: EmailAddress) -> Self {
        Self {
            from,
            to: Vec::new(),
            cc: Vec::new(),
            bcc: Vec::new(),
            subject: None,
            reply_to: None,
            attachments: Vec::new(),
            html_body: String::new(),
            base_path: None,
        }
    }

    /// The `To` header value, comma separated
    pub fn to_header(&self) -> String {
        self.to
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// A copy without the `Subject` and `To` headers
    pub fn without_subject_and_to(&self) -> Self {
        Self {
            to: Vec::new(),
            subject: None,
            ..self.clone()
        }
    }
}
