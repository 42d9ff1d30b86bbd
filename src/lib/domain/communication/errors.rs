//! Error types for the templated email module

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::communication::{mailer::MailerError, templates::RenderError};

/// Templated email errors
#[derive(Debug, Error)]
pub enum TemplatedEmailError {
    /// The resolved template is not a file
    #[error("mail template {} not found", .0.display())]
    TemplateNotFound(PathBuf),

    /// `send` was called before a template was set
    #[error("no mail template has been set")]
    MissingTemplate,

    /// The renderer failed
    #[error(transparent)]
    Render(#[from] RenderError),

    /// The transport failed
    #[error(transparent)]
    Mailer(#[from] MailerError),
}
