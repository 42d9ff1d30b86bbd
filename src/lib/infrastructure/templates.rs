//! Template engines

mod jinja;

pub use jinja::MiniJinjaRenderer;
