//! Template rendering collaborator

use std::{fmt, path::PathBuf, sync::Arc};

use serde::{ser::Error as _, Serialize};

#[cfg(test)]
use mockall::mock;

mod errors;

pub use errors::RenderError;

/// Template parameters, keyed by name
pub type Parameters = serde_json::Map<String, serde_json::Value>;

/// Converts any serializable value into [`Parameters`]
///
/// The value must serialize to a map, e.g. a struct with named fields.
pub fn to_parameters<T: Serialize>(value: &T) -> Result<Parameters, serde_json::Error> {
    match serde_json::to_value(value)? {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(serde_json::Error::custom(format!(
            "template parameters must be a map, got {other}"
        ))),
    }
}

/// Translates a message into the active locale
pub trait Translator: Send + Sync + 'static {
    /// Returns the translation of `message`, or `message` itself when there is none
    fn translate(&self, message: &str) -> String;
}

/// Everything a renderer needs for one template
#[derive(Clone)]
pub struct RenderContext {
    /// The resolved template file
    pub template: PathBuf,

    /// Values made available to the template
    pub parameters: Parameters,

    /// Exposed to the template as the `translate` filter when present
    pub translator: Option<Arc<dyn Translator>>,
}

impl fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("template", &self.template)
            .field("parameters", &self.parameters)
            .field("translator", &self.translator.is_some())
            .finish()
    }
}

/// Template renderer
pub trait TemplateRenderer: Send + Sync + 'static {
    /// Renders the template in `context` to an HTML string.
    ///
    /// # Arguments
    /// * `context` - The [`RenderContext`] holding the template path and parameters.
    ///
    /// # Returns
    /// A [`Result`] which is [`Ok`] containing the rendered HTML,
    /// or an [`Err`] containing a [`RenderError`] if rendering failed.
    fn render(&self, context: &RenderContext) -> Result<String, RenderError>;
}

#[cfg(test)]
mock! {
    pub TemplateRenderer {}

    impl TemplateRenderer for TemplateRenderer {
        fn render(&self, context: &RenderContext) -> Result<String, RenderError>;
    }
}
