//! Templated email builder

use std::{
    fmt, mem,
    path::PathBuf,
    sync::Arc,
};

use serde_json::Value;
use tracing::{debug, info};

use crate::domain::communication::{
    email_addresses::{qualify_address, EmailAddress},
    errors::TemplatedEmailError,
    mailer::{Mailer, RenderedMessage},
    storage::{StorageError, StorageProvisioner},
    templates::{Parameters, RenderContext, TemplateRenderer, Translator},
};

use super::{
    CopyRecipients, PendingMessage, RequestContext, TemplatedEmailConfig, TransportChoice,
    TransportSelector, DOMAIN_PARAMETER,
};

/// Directory under the template storage that inline assets resolve against
const IMAGES_DIR: &str = "images";

/// Fluent builder for one templated email at a time
///
/// Mutators return the builder so calls chain. The builder is not meant to be
/// shared between concurrent compose cycles.
pub struct EmailBuilder<M, R, D> {
    template_storage: PathBuf,
    template_extension: String,
    from_name: String,
    from_email: String,
    copy_recipients: CopyRecipients,
    request: Box<dyn RequestContext>,
    renderer: Arc<R>,
    transport: TransportSelector<M, D>,
    translator: Option<Arc<dyn Translator>>,
    pending: PendingMessage,
}

impl<M, R, D> fmt::Debug for EmailBuilder<M, R, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailBuilder")
            .field("template_storage", &self.template_storage)
            .field("template_extension", &self.template_extension)
            .field("from_name", &self.from_name)
            .field("from_email", &self.from_email)
            .field("copy_recipients", &self.copy_recipients)
            .field("translator", &self.translator.is_some())
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl<M, R, D> EmailBuilder<M, R, D>
where
    M: Mailer,
    R: TemplateRenderer,
    D: Mailer,
{
    /// Creates a new builder, provisioning the debug and template storage.
    ///
    /// # Arguments
    /// * `config` - Storage paths and the default sender.
    /// * `request` - The [`RequestContext`] supplying the current host.
    /// * `renderer` - Renders template files to HTML.
    /// * `transport` - Picks the debug sink or the production mailer.
    /// * `provisioner` - Makes the storage directories writable.
    ///
    /// # Returns
    /// - [`Ok`] with the builder.
    /// - [`Err`] containing [`StorageError::StorageUnavailable`] if either
    ///   storage directory cannot be made writable.
    pub fn new(
        config: &TemplatedEmailConfig,
        request: impl RequestContext,
        renderer: Arc<R>,
        transport: TransportSelector<M, D>,
        provisioner: &impl StorageProvisioner,
    ) -> Result<Self, StorageError> {
        provisioner.ensure_writable(&config.debug_storage)?;
        provisioner.ensure_writable(&config.template_storage)?;

        Ok(Self {
            template_storage: config.template_storage.clone(),
            template_extension: config.template_extension.clone(),
            from_name: config.from_name.clone(),
            from_email: config.from_email.clone(),
            copy_recipients: config.copy_recipients,
            request: Box::new(request),
            renderer,
            transport,
            translator: None,
            pending: PendingMessage::default(),
        })
    }

    /// Makes `translator` available to templates as the `translate` filter
    pub fn set_translator(&mut self, translator: Arc<dyn Translator>) -> &mut Self {
        self.translator = Some(translator);
        self
    }

    /// Changes the default sender display name
    pub fn set_from_name(&mut self, from_name: impl Into<String>) -> &mut Self {
        self.from_name = from_name.into();
        self
    }

    /// Changes the default sender address
    pub fn set_from_email(&mut self, from_email: impl Into<String>) -> &mut Self {
        self.from_email = from_email.into();
        self
    }

    /// The message composed so far
    pub fn pending(&self) -> &PendingMessage {
        &self.pending
    }

    /// The transport the next send will use
    pub fn transport_choice(&self) -> TransportChoice {
        self.transport.choice()
    }

    /// Directory relative asset references in rendered bodies resolve against
    pub fn images_path(&self) -> PathBuf {
        self.template_storage.join(IMAGES_DIR)
    }

    /// Sets the sender, replacing any previous one.
    ///
    /// The address is lower-cased and, without a domain part, placed on the
    /// request host. Without a name the default display name is used.
    pub fn set_from(&mut self, email: &str, name: Option<&str>) -> &mut Self {
        let address = qualify_address(email, &self.request.host());
        let name = name.filter(|n| !n.is_empty()).unwrap_or(&self.from_name);

        self.pending.sender = Some(EmailAddress::new(address, Some(name)));
        self
    }

    /// Appends a primary recipient
    pub fn add_to(&mut self, email: &str, name: Option<&str>) -> &mut Self {
        self.pending.recipients.push(EmailAddress::new(email, name));
        self
    }

    /// Appends a carbon copy recipient
    pub fn add_cc(&mut self, email: &str, name: Option<&str>) -> &mut Self {
        self.pending.cc_recipients.push(EmailAddress::new(email, name));
        self
    }

    /// Appends a blind carbon copy recipient
    pub fn add_bcc(&mut self, email: &str, name: Option<&str>) -> &mut Self {
        self.pending.bcc_recipients.push(EmailAddress::new(email, name));
        self
    }

    /// Sets the reply-to address. Unlike recipients this replaces the previous value.
    pub fn add_reply_to(&mut self, email: &str, name: Option<&str>) -> &mut Self {
        self.pending.reply_to = Some(EmailAddress::new(email, name));
        self
    }

    /// Sets the subject
    pub fn set_subject(&mut self, subject: impl Into<String>) -> &mut Self {
        self.pending.subject = Some(subject.into());
        self
    }

    /// Appends an attachment. The file is only read when the message is sent.
    pub fn add_attachment(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.pending.attachments.push(path.into());
        self
    }

    /// Replaces the template parameters. `domain` is always set to the request host.
    pub fn set_parameters(&mut self, mut parameters: Parameters) -> &mut Self {
        parameters.insert(
            DOMAIN_PARAMETER.to_string(),
            Value::String(self.request.host()),
        );

        self.pending.parameters = parameters;
        self
    }

    /// Resolves `identifier` to `<template storage>/<identifier>.<extension>`.
    ///
    /// # Returns
    /// - [`Ok`] with the builder when the template file exists.
    /// - [`Err`] containing [`TemplatedEmailError::TemplateNotFound`] otherwise.
    pub fn set_template(&mut self, identifier: &str) -> Result<&mut Self, TemplatedEmailError> {
        let template = self
            .template_storage
            .join(format!("{identifier}.{}", self.template_extension));

        if !template.is_file() {
            return Err(TemplatedEmailError::TemplateNotFound(template));
        }

        debug!(template = %template.display(), "mail template resolved");

        self.pending.template = Some(template);
        Ok(self)
    }

    /// Starts a new message from the template `name`.
    ///
    /// Same as [`Self::reset`], [`Self::set_template`] then [`Self::set_parameters`].
    pub fn compose_from(
        &mut self,
        name: &str,
        parameters: Parameters,
    ) -> Result<&mut Self, TemplatedEmailError> {
        self.reset();
        self.set_template(name)?;

        Ok(self.set_parameters(parameters))
    }

    /// Clears everything composed so far
    pub fn reset(&mut self) -> &mut Self {
        self.pending = PendingMessage::default();
        self
    }

    /// Renders the pending message and dispatches it.
    ///
    /// The builder is reset whether or not rendering and dispatch succeed.
    ///
    /// # Returns
    /// - [`Ok`] when the transport accepted the message.
    /// - [`Err`] with [`TemplatedEmailError::MissingTemplate`] when no template was set,
    ///   or the renderer/transport failure unchanged.
    pub fn send(&mut self) -> Result<(), TemplatedEmailError> {
        let pending = mem::take(&mut self.pending);

        self.dispatch(pending)
    }

    fn dispatch(&self, pending: PendingMessage) -> Result<(), TemplatedEmailError> {
        let template = pending
            .template
            .ok_or(TemplatedEmailError::MissingTemplate)?;

        let mut message = RenderedMessage::new(
            pending.sender.unwrap_or_else(|| self.default_sender()),
        );

        message.to = pending.recipients;
        match self.copy_recipients {
            CopyRecipients::Distinct => {
                message.cc = pending.cc_recipients;
                message.bcc = pending.bcc_recipients;
            }
            CopyRecipients::Folded => {
                message.to.extend(pending.cc_recipients);
                message.to.extend(pending.bcc_recipients);
            }
        }
        message.subject = pending.subject;
        message.reply_to = pending.reply_to;
        message.attachments = pending.attachments;

        let mut parameters = pending.parameters;
        parameters.insert(
            DOMAIN_PARAMETER.to_string(),
            Value::String(self.request.host()),
        );

        let context = RenderContext {
            template,
            parameters,
            translator: self.translator.clone(),
        };

        message.html_body = self.renderer.render(&context)?;
        message.base_path = Some(self.images_path());

        info!(
            transport = ?self.transport.choice(),
            template = %context.template.display(),
            recipients = message.to.len() + message.cc.len() + message.bcc.len(),
            "sending templated email"
        );

        self.transport.select().send(&message)?;

        Ok(())
    }

    fn default_sender(&self) -> EmailAddress {
        EmailAddress::new(
            self.from_email.clone(),
            Some(self.from_name.as_str()).filter(|n| !n.is_empty()),
        )
    }
}
