//! SMTP email service implementation

use std::{fs, path::Path};

use anyhow::Result;
use clap::Parser;
use lettre::{
    message::{header::ContentType, Attachment, Mailbox, MultiPart, SinglePart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    Message, SmtpTransport, Transport,
};
use tracing::debug;

use crate::{
    domain::communication::{
        email_addresses::EmailAddress,
        mailer::{Mailer, MailerError, RenderedMessage},
    },
    infrastructure::email::inline::embed_assets,
};

/// SMTP configuration
#[derive(Clone, Default, Debug, Parser)]
pub struct SMTPConfig {
    /// The SMTP host
    #[clap(long = "smtp-host", env = "SMTP_HOST", default_value = "localhost")]
    pub host: String,

    /// The SMTP port
    #[clap(long = "smtp-port", env = "SMTP_PORT", default_value = "587")]
    pub port: u16,

    /// The SMTP username
    #[clap(long = "smtp-user", env = "SMTP_USER", default_value = "")]
    pub username: String,

    /// The SMTP password
    #[clap(long = "smtp-password", env = "SMTP_PASSWORD", default_value = "")]
    pub password: String,

    /// Verify the TLS certificate
    #[clap(long = "smtp-verify-tls", env = "SMTP_VERIFY_TLS", default_value = "true")]
    pub verify_tls: bool,

    /// Enable STARTTLS (TLS upgrade on connection)
    #[clap(long = "smtp-starttls", env = "SMTP_STARTTLS", default_value = "true")]
    pub starttls: bool,
}

/// SMTP mailer
#[derive(Debug, Default, Clone)]
pub struct SMTPMailer {
    config: SMTPConfig,
}

impl SMTPMailer {
    /// Create a new SMTP mailer
    pub fn new(config: SMTPConfig) -> Self {
        Self { config }
    }

    /// Build the SMTP transport described by the configuration
    pub fn mailer(&self) -> Result<SmtpTransport> {
        let relay = if self.config.starttls {
            SmtpTransport::starttls_relay(&self.config.host)?
        } else {
            SmtpTransport::relay(&self.config.host)?
        };

        let mut relay = relay.port(self.config.port).tls(self.tls()?);

        if !self.config.username.is_empty() {
            relay = relay.credentials(Credentials::new(
                self.config.username.clone(),
                self.config.password.clone(),
            ));
        }

        Ok(relay.build())
    }

    /// STARTTLS is mandatory when enabled, otherwise the connection is
    /// wrapped in TLS from the start.
    fn tls(&self) -> Result<Tls> {
        let parameters = TlsParameters::builder(self.config.host.to_string())
            .dangerous_accept_invalid_certs(!self.config.verify_tls)
            .build()?;

        if self.config.starttls {
            Ok(Tls::Required(parameters))
        } else {
            Ok(Tls::Wrapper(parameters))
        }
    }
}

/// Converts a [`RenderedMessage`] into a lettre [`Message`]
///
/// Relative assets under the message base path become inline parts and every
/// attachment is read from disk at this point.
pub fn build_message(message: &RenderedMessage) -> Result<Message, MailerError> {
    let mut builder = Message::builder().from(mailbox(&message.from)?);

    for to in &message.to {
        builder = builder.to(mailbox(to)?);
    }

    for cc in &message.cc {
        builder = builder.cc(mailbox(cc)?);
    }

    for bcc in &message.bcc {
        builder = builder.bcc(mailbox(bcc)?);
    }

    if let Some(subject) = &message.subject {
        builder = builder.subject(subject);
    }

    if let Some(reply_to) = &message.reply_to {
        builder = builder.reply_to(mailbox(reply_to)?);
    }

    let (html, assets) = match &message.base_path {
        Some(base_path) => embed_assets(&message.html_body, base_path),
        None => (message.html_body.clone(), Vec::new()),
    };

    let mut related = MultiPart::related().singlepart(SinglePart::html(html));
    for asset in assets {
        related = related.singlepart(
            Attachment::new_inline(asset.content_id)
                .body(read_file(&asset.path)?, content_type(&asset.path)?),
        );
    }

    if message.attachments.is_empty() {
        return Ok(builder.multipart(related)?);
    }

    let mut mixed = MultiPart::mixed().multipart(related);
    for path in &message.attachments {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        mixed = mixed.singlepart(Attachment::new(filename).body(read_file(path)?, content_type(path)?));
    }

    Ok(builder.multipart(mixed)?)
}

fn mailbox(email: &EmailAddress) -> Result<Mailbox, MailerError> {
    Ok(Mailbox::new(
        email.name().map(str::to_string),
        email.address().parse()?,
    ))
}

fn read_file(path: &Path) -> Result<Vec<u8>, MailerError> {
    fs::read(path).map_err(|source| MailerError::Attachment {
        path: path.to_path_buf(),
        source,
    })
}

fn content_type(path: &Path) -> Result<ContentType, MailerError> {
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    ContentType::parse(mime.as_ref()).map_err(|e| MailerError::UnknownError(e.into()))
}

impl Mailer for SMTPMailer {
    fn send(&self, message: &RenderedMessage) -> Result<(), MailerError> {
        let email = build_message(message)?;

        debug!(
            host = %self.config.host,
            recipients = message.to.len() + message.cc.len() + message.bcc.len(),
            "sending email over SMTP"
        );

        match self.mailer()?.send(&email) {
            Ok(_) => Ok(()),
            Err(e) => Err(MailerError::UnknownError(e.into())),
        }
    }
}
