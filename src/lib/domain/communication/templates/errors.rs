//! Error types for template rendering

use std::{io, path::PathBuf};

use thiserror::Error;

/// Template rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template file could not be read
    #[error("could not read template {}", path.display())]
    Io {
        /// The template that failed to load
        path: PathBuf,

        /// The underlying read failure
        #[source]
        source: io::Error,
    },

    /// The template engine rejected the template
    #[error(transparent)]
    Template(#[from] minijinja::Error),

    /// CSS could not be inlined into the rendered HTML
    #[error(transparent)]
    CssInline(#[from] css_inline::InlineError),

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}
