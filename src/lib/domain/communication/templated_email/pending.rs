//! The message being composed

use std::path::{Path, PathBuf};

use crate::domain::communication::{email_addresses::EmailAddress, templates::Parameters};

/// Message fields accumulated between two sends
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PendingMessage {
    pub(super) template: Option<PathBuf>,
    pub(super) parameters: Parameters,
    pub(super) sender: Option<EmailAddress>,
    pub(super) recipients: Vec<EmailAddress>,
    pub(super) cc_recipients: Vec<EmailAddress>,
    pub(super) bcc_recipients: Vec<EmailAddress>,
    pub(super) subject: Option<String>,
    pub(super) reply_to: Option<EmailAddress>,
    pub(super) attachments: Vec<PathBuf>,
}

impl PendingMessage {
    /// The resolved template file
    pub fn template(&self) -> Option<&Path> {
        self.template.as_deref()
    }

    /// Parameters handed to the renderer
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// The sender override
    pub fn sender(&self) -> Option<&EmailAddress> {
        self.sender.as_ref()
    }

    /// Primary recipients
    pub fn recipients(&self) -> &[EmailAddress] {
        &self.recipients
    }

    /// Carbon copy recipients
    pub fn cc_recipients(&self) -> &[EmailAddress] {
        &self.cc_recipients
    }

    /// Blind carbon copy recipients
    pub fn bcc_recipients(&self) -> &[EmailAddress] {
        &self.bcc_recipients
    }

    /// The subject
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// The reply-to address
    pub fn reply_to(&self) -> Option<&EmailAddress> {
        self.reply_to.as_ref()
    }

    /// Files to attach
    pub fn attachments(&self) -> &[PathBuf] {
        &self.attachments
    }

    /// Whether nothing has been set since the last reset
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
