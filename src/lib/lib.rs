#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Templated email builder
//!
//! Accumulates an outbound message across chained calls, renders it from a
//! named template and hands it either to a filesystem debug sink or to a real
//! mail transport.

pub mod domain;
pub mod infrastructure;
