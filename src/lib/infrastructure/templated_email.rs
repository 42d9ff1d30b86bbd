//! Templated email wiring

use std::sync::Arc;

use crate::{
    domain::communication::{
        mailer::Mailer,
        storage::StorageError,
        templated_email::{EmailBuilder, RequestContext, TemplatedEmailConfig, TransportSelector},
        templates::TemplateRenderer,
    },
    infrastructure::{email::filesystem::DebugMailSink, storage::DirectoryProvisioner},
};

/// Creates an [`EmailBuilder`] that writes to `config.debug_storage` in debug
/// mode and hands messages to `mailer` otherwise.
///
/// Both storage directories are provisioned with a [`DirectoryProvisioner`].
pub fn email_builder<M, R>(
    config: &TemplatedEmailConfig,
    request: impl RequestContext,
    renderer: Arc<R>,
    mailer: Arc<M>,
) -> Result<EmailBuilder<M, R, DebugMailSink>, StorageError>
where
    M: Mailer,
    R: TemplateRenderer,
{
    let debug_sink = Arc::new(DebugMailSink::new(&config.debug_storage));
    let transport = TransportSelector::new(config.debug, debug_sink, mailer);

    EmailBuilder::new(
        config,
        request,
        renderer,
        transport,
        &DirectoryProvisioner::default(),
    )
}
