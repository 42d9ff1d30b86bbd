//! MiniJinja template renderer

use std::{fs, path::PathBuf, sync::Arc};

use minijinja::{path_loader, AutoEscape, Environment};
use tracing::debug;

use crate::domain::communication::templates::{
    RenderContext, RenderError, TemplateRenderer, Translator,
};

/// Renders template files with MiniJinja
///
/// Templates under the root are loaded by their relative name, so
/// `{% extends %}` and `{% include %}` resolve against the same directory.
/// Output is HTML-escaped by default.
#[derive(Debug, Clone)]
pub struct MiniJinjaRenderer {
    root: PathBuf,
    inline_css: bool,
}

impl MiniJinjaRenderer {
    /// Creates a renderer loading templates from `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            inline_css: false,
        }
    }

    /// Moves `<style>` rules into `style` attributes after rendering
    pub fn with_inline_css(mut self, inline_css: bool) -> Self {
        self.inline_css = inline_css;
        self
    }

    fn environment(&self, translator: Option<Arc<dyn Translator>>) -> Environment<'static> {
        let mut env = Environment::new();

        env.set_loader(path_loader(self.root.clone()));
        env.set_auto_escape_callback(|_| AutoEscape::Html);

        if let Some(translator) = translator {
            env.add_filter("translate", move |message: String| {
                translator.translate(&message)
            });
        }

        env
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(&self, context: &RenderContext) -> Result<String, RenderError> {
        let env = self.environment(context.translator.clone());

        let html = match context.template.strip_prefix(&self.root) {
            Ok(relative) => {
                let name = relative.to_string_lossy().replace('\\', "/");
                debug!(template = %name, "rendering template");

                env.get_template(&name)?.render(&context.parameters)?
            }
            Err(_) => {
                let source = fs::read_to_string(&context.template).map_err(|source| {
                    RenderError::Io {
                        path: context.template.clone(),
                        source,
                    }
                })?;

                env.render_str(&source, &context.parameters)?
            }
        };

        if self.inline_css {
            Ok(css_inline::inline(&html)?)
        } else {
            Ok(html)
        }
    }
}
